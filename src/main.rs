//! # Voxel World Entry Point
//!
//! Runs the headless demo walk from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- voxel-world.json
//! ```

fn main() {
    if let Err(error) = voxel_world::run() {
        log::error!("{error}");
        std::process::exit(1);
    }
}
