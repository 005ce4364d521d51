use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::view::ViewTree;

const HEADERS: [&str; 5] = ["scene", "image_url", "ground_truth", "plausibility", "highlight"];

/// Export the rendered scenes to CSV with headers:
/// scene,image_url,ground_truth,plausibility,highlight
pub fn export_csv(view: &ViewTree, path: impl AsRef<Path>) -> Result<()> {
    let wtr = csv::Writer::from_path(path)?;
    write_rows(view, wtr)
}

/// Same as [`export_csv`] but to any writer (stdout in the headless exporter).
pub fn write_csv<W: Write>(view: &ViewTree, out: W) -> Result<()> {
    write_rows(view, csv::Writer::from_writer(out))
}

fn write_rows<W: Write>(view: &ViewTree, mut wtr: csv::Writer<W>) -> Result<()> {
    wtr.write_record(HEADERS)?;
    for scene in &view.scenes {
        wtr.write_record([
            scene.scene.to_string().as_str(),
            scene.image_url.as_str(),
            scene.ground_truth.to_string().as_str(),
            scene.plausibility.to_string().as_str(),
            scene.highlight.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Pretty-printed JSON of the whole view tree.
pub fn to_json(view: &ViewTree) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}
