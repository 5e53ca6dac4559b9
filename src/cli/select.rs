use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::auth::{resolve, scope_to_registry, AuthFile, ImageReference};

/// Options for selecting the auth entry of a single image
#[derive(Debug, Clone)]
pub struct SelectOptions<'a> {
    pub image_ref: &'a str,
    pub authfile: Option<&'a Path>,
    /// Emit the entry under the registry host instead of its original key
    pub registry_key: bool,
}

/// Write the minimal auth file for `options.image_ref` to `out`.
///
/// Finding no entry is not an error: an empty `{"auths":{}}` is written.
pub fn select_auth(options: &SelectOptions<'_>, out: &mut impl Write) -> Result<()> {
    if options.image_ref.is_empty() {
        bail!("Image reference must not be empty");
    }

    let path = AuthFile::locate(options.authfile)?;
    let auth_file = AuthFile::load_from_path(&path)?;
    debug!(
        entries = auth_file.auths.len(),
        "Loaded auth file {}",
        path.display()
    );

    let mut auths = resolve(options.image_ref, &auth_file.auths);
    if auths.is_empty() {
        info!("No credentials found for {}", options.image_ref);
    }

    if options.registry_key {
        let reference = ImageReference::parse(options.image_ref);
        auths = scope_to_registry(auths, &reference);
    }

    let line = AuthFile::new(auths).to_json_line()?;
    out.write_all(line.as_bytes())
        .context("Failed to write selected auth")?;

    Ok(())
}
