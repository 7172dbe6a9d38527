use crate::app::Workspace;
use anyhow::{bail, Result};

/// Check that every external tool the commands delegate to can be found.
pub fn run(ws: &Workspace) -> Result<()> {
    let mut ok = true;

    let tools = [
        ws.cargo.to_string_lossy().into_owned(),
        ws.config.tools.qemu.clone(),
    ]
    .into_iter()
    .chain(packager_tools(ws));

    for tool in tools {
        match which::which(&tool) {
            Ok(path) => eprintln!("[OK] {tool} ({})", path.display()),
            Err(_) => {
                eprintln!("[FAIL] missing `{tool}` in PATH");
                ok = false;
            }
        }
    }

    #[cfg(feature = "grub")]
    {
        let grub_config = ws.root.join(&ws.config.image.grub_config);
        if grub_config.is_file() {
            eprintln!("[OK] {}", grub_config.display());
        } else {
            eprintln!("[FAIL] missing GRUB config: {}", grub_config.display());
            ok = false;
        }
    }

    if !ok {
        bail!("doctor checks failed");
    }
    Ok(())
}

#[cfg(feature = "grub")]
fn packager_tools(ws: &Workspace) -> Option<String> {
    Some(ws.config.tools.mkrescue.clone())
}

#[cfg(not(feature = "grub"))]
fn packager_tools(_ws: &Workspace) -> Option<String> {
    None
}
