/// Example: generate the default building and spin it in the terminal
///
/// Usage: cargo run -p maquette-cli --example spin_tower
use maquette_cli::TerminalApp;
use maquette_core::Frustum;

fn main() -> anyhow::Result<()> {
    let mesh = Frustum::new(8, 6.0, 1.0, 0.8)?.mesh()?;

    println!(
        "Generated {} faces, starting preview (press Q to quit)...",
        mesh.face_count()
    );
    std::thread::sleep(std::time::Duration::from_secs(1));

    TerminalApp::new(mesh)?.run()?;
    Ok(())
}
