// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Copy an item into a drop zone.
//!
//! Three draggable items and one drop zone on a headless surface. Each step
//! of the gesture prints the rendered story; run with `RUST_LOG=trace` to see
//! every state transition.
//!
//! Run:
//! - `cargo run -p understory_drop_demos --example simple_copy`
//! - `cargo run -p understory_drop_demos --example simple_copy -- zone.json`

use std::error::Error;
use std::path::Path;

use understory_drop::config::DropZoneConfig;
use understory_drop_demos::{SimpleCopy, init_tracing, load_zone_config};

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => load_zone_config(Path::new(&path))?,
        None => DropZoneConfig::default(),
    };
    let mut story = SimpleCopy::mount(config);
    println!("mounted:   {}", story.render());

    story.surface.begin_drag(&story.sources[1])?;
    println!("drag 2:    {}", story.render());

    story.surface.drag_over(story.zone)?;
    println!("over zone: {}", story.render());

    let release = story.surface.release(story.zone)?;
    println!("released:  {}   {release:?}", story.render());

    // A text drag from elsewhere on the page is not accepted.
    story
        .surface
        .begin_drag_with(|session| session.set_payload("text/plain", "hello"))?;
    println!("text drag: {}", story.render());
    story.surface.drag_over(story.zone)?;
    let release = story.surface.release(story.zone)?;
    println!("released:  {}   {release:?}", story.render());

    story.drag_past_zone(0)?;
    println!("passed by: {}", story.render());
    Ok(())
}
