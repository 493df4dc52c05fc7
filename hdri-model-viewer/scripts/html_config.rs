use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

// Trunk post-build hook: make the generated bundle paths relative so the viewer can be
// served from any sub-path.
fn main() -> io::Result<()> {
    let staging_dir = env::var("TRUNK_STAGING_DIR")
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;

    let staged_html_path = PathBuf::from(staging_dir).join("index.html");
    let html = fs::read_to_string(&staged_html_path)?;

    let html = html
        .replace("/hdri-model-viewer.js", "./hdri-model-viewer.js")
        .replace("/hdri-model-viewer_bg.wasm", "./hdri-model-viewer_bg.wasm");

    fs::write(staged_html_path, html)
}
