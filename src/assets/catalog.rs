// Bundled sound lookup
// Resolves a sound name like "ding" to a file in the application's sound directory
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extensions tried, in order, when a name is given without one.
pub const SOUND_EXTENSIONS: &[&str] = &["wav", "ogg", "oga", "mp3", "flac"];

pub struct SoundCatalog {
    root: PathBuf,
}

impl SoundCatalog {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the file backing `name`, or `None` if nothing is packaged under it.
    ///
    /// Names are plain identifiers: anything that would escape the sound
    /// directory resolves to nothing.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if !is_valid_name(name) {
            debug!("Rejected sound name {:?}", name);
            return None;
        }

        let exact = self.root.join(name);
        if Path::new(name).extension().is_some() && exact.is_file() {
            return Some(exact);
        }

        // Extensions match case-insensitively so everything `names` lists resolves
        self.sound_files()
            .into_iter()
            .filter(|path| path.file_stem().and_then(|s| s.to_str()) == Some(name))
            .filter_map(|path| extension_rank(&path).map(|rank| (rank, path)))
            .min_by(|(a_rank, a), (b_rank, b)| a_rank.cmp(b_rank).then_with(|| a.cmp(b)))
            .map(|(_, path)| path)
    }

    /// Names of all packaged sounds, sorted, without extensions.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .sound_files()
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    fn sound_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.root)
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_sound_extension(path))
            .collect()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(|c: char| c == '/' || c == '\\' || c == ':')
        && !name.starts_with('.')
}

/// Position of the file's extension in `SOUND_EXTENSIONS`, ignoring case.
fn extension_rank(path: &Path) -> Option<usize> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    SOUND_EXTENSIONS.iter().position(|known| *known == ext)
}

fn has_sound_extension(path: &Path) -> bool {
    extension_rank(path).is_some()
}
