use crate::AssetError;
use std::path::{Path, PathBuf};

/// Cube map face order expected by the GPU: +x, -x, +y, -y, +z, -z.
pub const CUBE_FACES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

/// Decoded RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    /// A single pixel of `rgba`, used as a stand-in when a texture is missing.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.rgba.get(i..i + 4)?.try_into().ok()
    }
}

/// Read and decode an image file into RGBA8.
pub fn load_image(path: impl AsRef<Path>) -> Result<ImageData, AssetError> {
    let path = path.as_ref();
    let decoded = image::open(path)
        .map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    tracing::debug!(path = %path.display(), width, height, "decoded image");
    Ok(ImageData {
        width,
        height,
        rgba: decoded.into_raw(),
    })
}

/// Six square faces of equal size, in [`CUBE_FACES`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeMapImages {
    pub size: u32,
    pub faces: Vec<ImageData>,
}

impl CubeMapImages {
    /// 1x1 faces of one color.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            size: 1,
            faces: vec![ImageData::solid(rgba); 6],
        }
    }
}

/// Load the six faces of a cube map, checking they share one square size.
pub fn load_cube_map(paths: &[PathBuf]) -> Result<CubeMapImages, AssetError> {
    if paths.len() != CUBE_FACES.len() {
        return Err(AssetError::CubeMapFaceCount(paths.len()));
    }
    let faces = paths
        .iter()
        .map(load_image)
        .collect::<Result<Vec<_>, _>>()?;

    let size = faces[0].width;
    for (face, image) in CUBE_FACES.iter().zip(&faces) {
        if image.width != size || image.height != size {
            return Err(AssetError::CubeMapMismatch {
                face: *face,
                expected: size,
                found: (image.width, image.height),
            });
        }
    }
    Ok(CubeMapImages { size, faces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn write_png(dir: &Path, name: &str, size: (u32, u32), color: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(size.0, size.1, Rgba(color))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn load_png_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "matcap.png", (4, 2), [10, 20, 30, 255]);
        let image = load_image(&path).unwrap();
        assert_eq!((image.width, image.height), (4, 2));
        assert_eq!(image.rgba.len(), 4 * 2 * 4);
        assert_eq!(image.pixel(3, 1), Some([10, 20, 30, 255]));
        assert_eq!(image.pixel(4, 0), None);
    }

    #[test]
    fn missing_file_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }

    #[test]
    fn cube_map_loads_six_equal_faces() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = CUBE_FACES
            .iter()
            .map(|f| write_png(dir.path(), &format!("{f}.png"), (8, 8), [0, 0, 0, 255]))
            .collect();
        let cube = load_cube_map(&paths).unwrap();
        assert_eq!(cube.size, 8);
        assert_eq!(cube.faces.len(), 6);
    }

    #[test]
    fn cube_map_rejects_mismatched_face() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = CUBE_FACES
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let size = if i == 3 { (8, 4) } else { (8, 8) };
                write_png(dir.path(), &format!("{f}.png"), size, [0, 0, 0, 255])
            })
            .collect();
        let err = load_cube_map(&paths).unwrap_err();
        assert!(matches!(
            err,
            AssetError::CubeMapMismatch {
                face: "ny",
                expected: 8,
                found: (8, 4)
            }
        ));
    }

    #[test]
    fn cube_map_needs_six_paths() {
        let err = load_cube_map(&[PathBuf::from("px.png")]).unwrap_err();
        assert!(matches!(err, AssetError::CubeMapFaceCount(1)));
    }

    #[test]
    fn solid_cube_map_is_one_pixel_per_face() {
        let cube = CubeMapImages::solid([128, 128, 128, 255]);
        assert_eq!(cube.size, 1);
        assert!(cube.faces.iter().all(|f| f.rgba == vec![128, 128, 128, 255]));
    }
}
