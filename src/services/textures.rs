//! Hatch texture files on disk.

use hatch_core::{Raster, TextureName, TextureSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::InitReport;
use crate::error::TextureError;
use crate::rendering::{decode_luminance, encode_grayscale_png};

/// File name a texture is stored under
pub fn texture_file_name(name: TextureName) -> &'static str {
    match name {
        TextureName::Right => "rightx.png",
        TextureName::Left => "leftx.png",
        TextureName::Horizontal => "horizontalx.png",
        TextureName::Vortex => "vortexx.png",
    }
}

/// Loads and stores the four texture files of a texture directory
pub struct TextureLoader {
    dir: PathBuf,
}

impl TextureLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: TextureName) -> PathBuf {
        self.dir.join(texture_file_name(name))
    }

    /// Names of textures missing from the directory
    pub fn missing(&self) -> Vec<TextureName> {
        TextureName::ALL
            .into_iter()
            .filter(|&name| !self.path_for(name).exists())
            .collect()
    }

    /// Load all four textures, converting each to luminance
    pub fn load(&self) -> Result<TextureSet, TextureError> {
        let set = TextureSet::new(
            self.load_one(TextureName::Right)?,
            self.load_one(TextureName::Left)?,
            self.load_one(TextureName::Horizontal)?,
            self.load_one(TextureName::Vortex)?,
        );
        let (width, height) = set.max_crop();
        tracing::info!(
            dir = %self.dir.display(),
            max_width = width,
            max_height = height,
            "Loaded hatch textures"
        );
        Ok(set)
    }

    /// Shorthand for `TextureLoader::new(dir).load()`
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<TextureSet, TextureError> {
        Self::new(dir).load()
    }

    fn load_one(&self, name: TextureName) -> Result<Raster, TextureError> {
        let path = self.path_for(name);
        let bytes = fs::read(&path).map_err(|e| TextureError::Read {
            path: path.clone(),
            source: e,
        })?;
        decode_luminance(&bytes).map_err(|e| TextureError::Decode {
            path,
            reason: e.to_string(),
        })
    }

    /// Write a texture set as grayscale PNGs
    ///
    /// Existing files are skipped unless `force` is set.
    pub fn write(&self, textures: &TextureSet, force: bool) -> Result<InitReport, TextureError> {
        fs::create_dir_all(&self.dir).map_err(|e| TextureError::Write {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut report = InitReport::default();
        for name in TextureName::ALL {
            let path = self.path_for(name);
            if !force && path.exists() {
                report.skipped.push(path.display().to_string());
                continue;
            }
            let png = encode_grayscale_png(textures.get(name), false).map_err(|e| {
                TextureError::Encode {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            })?;
            fs::write(&path, png).map_err(|e| TextureError::Write {
                path: path.clone(),
                source: e,
            })?;
            report.written.push(path.display().to_string());
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::generate_textures;

    #[test]
    fn test_file_names() {
        let names: Vec<_> = TextureName::ALL.into_iter().map(texture_file_name).collect();
        assert_eq!(
            names,
            vec!["rightx.png", "leftx.png", "horizontalx.png", "vortexx.png"]
        );
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let loader = TextureLoader::new(dir.path());
        assert_eq!(loader.missing().len(), 4);

        let generated = generate_textures(40).unwrap();
        let report = loader.write(&generated, false).unwrap();
        assert_eq!(report.written.len(), 4);
        assert!(loader.missing().is_empty());

        let loaded = TextureLoader::from_dir(dir.path()).unwrap();
        assert_eq!(loaded, generated);
    }

    #[test]
    fn test_write_skips_existing_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let loader = TextureLoader::new(dir.path());
        let textures = generate_textures(8).unwrap();
        loader.write(&textures, false).unwrap();

        let report = loader.write(&textures, false).unwrap();
        assert_eq!(report.skipped.len(), 4);
        let report = loader.write(&textures, true).unwrap();
        assert_eq!(report.written.len(), 4);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TextureLoader::from_dir(dir.path()).unwrap_err();
        match err {
            TextureError::Read { path, .. } => assert!(path.ends_with("rightx.png")),
            other => panic!("Expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = TextureLoader::new(dir.path());
        loader.write(&generate_textures(8).unwrap(), false).unwrap();
        fs::write(loader.path_for(TextureName::Left), b"not a png").unwrap();

        let err = loader.load().unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
    }
}
