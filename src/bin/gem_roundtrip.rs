/// Roundtrip diagnostic: read a GEM file, write it back, read the output.
/// Prints object counts at every step and every notification.
///
/// Usage: gem_roundtrip <input.gem> [shade_thickness]

use anyhow::{bail, Context};
use gem_tools_rs::io::gem::{model_from_gem_file, model_from_gem_str, model_to_gem};
use gem_tools_rs::{Model, ModelObject};

fn summarize(label: &str, model: &Model) {
    println!(
        "{}: {} rooms, {} faces, {} apertures, {} shades, {} meshes",
        label,
        model.room_count(),
        model.face_count(),
        model.rooms.iter().map(|r| r.aperture_count()).sum::<usize>(),
        model.orphaned_shades.len(),
        model.shade_meshes.len()
    );
    for room in &model.rooms {
        println!("   {} [{}]: {} faces", room.display_name(), room.identifier(), room.faces.len());
    }
    for notification in model.notifications.iter() {
        println!("   {}", notification);
    }
}

fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: gem_roundtrip <input.gem> [shade_thickness]");
    };
    let thickness: f64 = match args.next() {
        Some(value) => value
            .parse()
            .with_context(|| format!("invalid shade thickness {:?}", value))?,
        None => 0.0,
    };

    // 1. Read
    let model = model_from_gem_file(&path).with_context(|| format!("reading {}", path))?;
    summarize("1. Read", &model);

    // 2. Write
    let output = model_to_gem(&model, thickness).context("writing GEM text")?;
    println!("2. Wrote {} bytes, {} renamed rooms", output.text.len(), output.identifier_map.len());
    for notification in output.notifications.iter() {
        println!("   {}", notification);
    }
    println!("{}", output.identifier_map.to_json()?);

    // 3. Read back
    let again = model_from_gem_str(&output.text, model.display_name())
        .context("reading the written text")?;
    summarize("3. Read back", &again);

    if again.room_count() != model.room_count() {
        bail!(
            "room count changed: {} -> {}",
            model.room_count(),
            again.room_count()
        );
    }
    println!("OK");
    Ok(())
}
