//! Basic Pack Generation
//!
//! The minimal example: script in, pack and answer key out.
//!
//! ```bash
//! cargo run --example basic_pack
//! ```

use earshot::{answer_key_lines, generate_pack, Level, PackRequest};

fn main() {
    let script = "The ferry crossing takes about forty minutes in calm weather. \
        Passengers can pick up coffee from the small kiosk on the upper deck. \
        On clear days the lighthouse is visible from the starboard side. \
        The crew asks everyone to check the departure board for delays.";

    let request = PackRequest::new(Level::B1, script).with_title("Ferry Announcements");
    let pack = generate_pack(&request).expect("script is non-empty");

    println!("{} ({})", pack.meta.title, pack.meta.level);
    println!(
        "{} chunks, {} activities\n",
        pack.chunks.len(),
        pack.activities.len()
    );

    for chunk in &pack.chunks {
        println!("[{}] {} chars, anchors: {:?}", chunk.label, chunk.text.len(), chunk.anchors);
    }

    println!("\n--- answer key ---");
    for line in answer_key_lines(&pack) {
        println!("{line}");
    }
}
