use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

/// Files under `src/async/` that get a blocking twin in `OUT_DIR`
const DE_ASYNCED: [&str; 2] = ["driver.rs", "monitor.rs"];

fn main() -> std::io::Result<()> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Produce the sync versions from the async ones
    for name in DE_ASYNCED {
        let source = format!("src/async/{name}");
        println!("cargo:rerun-if-changed={source}");

        let asynced = std::fs::read_to_string(&source)?;
        let asynced = asynced.replace("embedded_hal_async", "embedded_hal");
        let asynced = asynced.replace("async", "");
        let asynced = asynced.replace(".await", "");

        File::create(out_dir.join(name))?.write_all(asynced.as_bytes())?;
    }

    Ok(())
}
