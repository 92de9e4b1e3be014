use anyhow::Result;

/// Desktop entry owning the scheme registration.
fn desktop_file_name(scheme: &str) -> String {
    format!("jelly-handler-{scheme}.desktop")
}

/// Register the scheme with the desktop environment: write a `.desktop`
/// entry claiming `x-scheme-handler/<scheme>` and make it the default
/// handler.
#[cfg(target_os = "linux")]
pub fn install(scheme: &str) -> Result<()> {
    use std::fs;
    use std::process::Command;

    use anyhow::{Context, bail};

    let applications = dirs::data_dir()
        .context("no user data directory")?
        .join("applications");
    fs::create_dir_all(&applications)
        .with_context(|| format!("failed to create {}", applications.display()))?;

    let exe = std::env::current_exe().context("cannot determine own executable path")?;
    let entry = format!(
        "[Desktop Entry]\n\
         Type=Application\n\
         Name=Jelly Handler\n\
         Exec={} %u\n\
         Terminal=false\n\
         NoDisplay=true\n\
         MimeType=x-scheme-handler/{scheme};\n",
        exe.display()
    );
    let file = desktop_file_name(scheme);
    fs::write(applications.join(&file), entry)
        .with_context(|| format!("failed to write {file}"))?;

    let status = Command::new("xdg-mime")
        .args(["default", &file, &format!("x-scheme-handler/{scheme}")])
        .status()
        .context("failed to run xdg-mime")?;
    if !status.success() {
        bail!("xdg-mime exited with {status}");
    }
    Ok(())
}

/// Remove the scheme registration. A scheme that was never installed is not
/// an error.
#[cfg(target_os = "linux")]
pub fn uninstall(scheme: &str) -> Result<()> {
    use std::fs;
    use std::io;

    use anyhow::Context;

    let applications = dirs::data_dir()
        .context("no user data directory")?
        .join("applications");
    match fs::remove_file(applications.join(desktop_file_name(scheme))) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => {
            Err(err).with_context(|| format!("failed to remove the {scheme} desktop entry"))
        }
    }
}

#[cfg(not(target_os = "linux"))]
pub fn install(_scheme: &str) -> Result<()> {
    anyhow::bail!("scheme registration is only implemented for Linux")
}

#[cfg(not(target_os = "linux"))]
pub fn uninstall(_scheme: &str) -> Result<()> {
    anyhow::bail!("scheme registration is only implemented for Linux")
}
