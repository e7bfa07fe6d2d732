use crate::AssetError;
use crate::texture::CUBE_FACES;
use honeybear_geometry::Typeface;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;
use std::time::Instant;

/// Where the demo's files live. Relative entries resolve against `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub root: PathBuf,
    pub font: PathBuf,
    /// Directory holding `px.jpg`, `nx.jpg`, .. `nz.jpg`.
    pub environment_map: PathBuf,
    pub environment_map_extension: String,
    pub matcap: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            root: PathBuf::from("static"),
            font: PathBuf::from("fonts/helvetiker_regular.typeface.json"),
            environment_map: PathBuf::from("textures/environmentMaps/0"),
            environment_map_extension: "jpg".into(),
            matcap: PathBuf::from("textures/matcaps/3.png"),
        }
    }
}

impl AssetPaths {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    pub fn font_path(&self) -> PathBuf {
        self.resolve(&self.font)
    }

    pub fn matcap_path(&self) -> PathBuf {
        self.resolve(&self.matcap)
    }

    /// The six face paths in GPU face order.
    pub fn cube_face_paths(&self) -> Vec<PathBuf> {
        let dir = self.resolve(&self.environment_map);
        CUBE_FACES
            .iter()
            .map(|face| dir.join(format!("{face}.{}", self.environment_map_extension)))
            .collect()
    }
}

/// Read and parse a three.js typeface JSON file.
pub fn load_typeface(path: impl AsRef<Path>) -> Result<Typeface, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let typeface = Typeface::from_slice(&bytes)?;
    tracing::debug!(
        path = %path.display(),
        family = %typeface.family_name,
        glyphs = typeface.glyphs.len(),
        "parsed typeface"
    );
    Ok(typeface)
}

/// Run `job` on a named loader thread and hand its result to `on_done`
/// on that same thread.
///
/// The caller never blocks; `on_done` is the only place the result shows up.
pub fn spawn_load<T, J, C>(name: &str, job: J, on_done: C) -> Result<JoinHandle<()>, AssetError>
where
    T: Send + 'static,
    J: FnOnce() -> Result<T, AssetError> + Send + 'static,
    C: FnOnce(Result<T, AssetError>) + Send + 'static,
{
    let label = name.to_owned();
    let handle = std::thread::Builder::new()
        .name(format!("load-{name}"))
        .spawn(move || {
            let started = Instant::now();
            let result = job();
            tracing::debug!(
                asset = %label,
                ok = result.is_ok(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "load finished"
            );
            on_done(result);
        })?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const FONT: &str = r#"{
        "glyphs": {
            "I": { "ha": 40, "o": "m 0 0 l 20 0 l 20 100 l 0 100 z" }
        },
        "familyName": "Test",
        "resolution": 100,
        "boundingBox": { "yMin": -20, "yMax": 100 },
        "underlineThickness": 10
    }"#;

    #[test]
    fn default_paths_resolve_under_root() {
        let paths = AssetPaths::with_root("/srv/assets");
        assert_eq!(
            paths.font_path(),
            PathBuf::from("/srv/assets/fonts/helvetiker_regular.typeface.json")
        );
        assert_eq!(
            paths.matcap_path(),
            PathBuf::from("/srv/assets/textures/matcaps/3.png")
        );
        let faces = paths.cube_face_paths();
        assert_eq!(faces.len(), 6);
        assert!(faces[0].ends_with("textures/environmentMaps/0/px.jpg"));
        assert!(faces[5].ends_with("textures/environmentMaps/0/nz.jpg"));
    }

    #[test]
    fn load_typeface_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.json");
        std::fs::write(&path, FONT).unwrap();
        let typeface = load_typeface(&path).unwrap();
        assert_eq!(typeface.family_name, "Test");
        assert!(typeface.glyphs.contains_key("I"));
    }

    #[test]
    fn missing_typeface_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        match load_typeface(&path) {
            Err(AssetError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn broken_typeface_is_a_geometry_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_typeface(&path),
            Err(AssetError::Geometry(_))
        ));
    }

    #[test]
    fn spawn_load_delivers_result_through_callback() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_load("answer", || Ok(42), move |result| {
            tx.send(result.map_err(|e| e.to_string())).unwrap();
        })
        .unwrap();
        handle.join().unwrap();
        assert_eq!(rx.recv().unwrap(), Ok(42));
    }

    #[test]
    fn spawn_load_delivers_errors_too() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_load(
            "broken",
            || Err::<(), _>(AssetError::CubeMapFaceCount(0)),
            move |result| tx.send(result.is_err()).unwrap(),
        )
        .unwrap();
        handle.join().unwrap();
        assert!(rx.recv().unwrap());
    }

    #[test]
    fn loader_threads_are_named() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_load(
            "font",
            || Ok(std::thread::current().name().map(str::to_owned)),
            move |result| tx.send(result.unwrap()).unwrap(),
        )
        .unwrap();
        handle.join().unwrap();
        assert_eq!(rx.recv().unwrap().as_deref(), Some("load-font"));
    }
}
