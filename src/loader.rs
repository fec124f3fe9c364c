use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::info;

use crate::LapDeltaError;
use crate::telemetry::LapData;

/// A lap file available for selection: path plus the name shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LapFileEntry {
    pub path: PathBuf,
    pub display_name: String,
}

/// Enumerates the `*.json` lap files in a folder, sorted by display name.
/// The display name is the file stem with underscores turned into spaces.
pub fn list_lap_files(folder: &Path) -> Result<Vec<LapFileEntry>, LapDeltaError> {
    if !folder.is_dir() {
        return Err(LapDeltaError::MissingLapFolder {
            path: format!("{}", folder.display()),
        });
    }
    let mut entries = Vec::new();
    let dir = std::fs::read_dir(folder).map_err(|e| LapDeltaError::LapFileIo { source: e })?;
    for entry in dir {
        let path = entry
            .map_err(|e| LapDeltaError::LapFileIo { source: e })?
            .path();
        if path.extension().is_none_or(|ext| ext != "json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        entries.push(LapFileEntry {
            display_name: stem.replace('_', " "),
            path,
        });
    }
    entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    info!("Found {} lap files in {:?}", entries.len(), folder);
    Ok(entries)
}

/// Decodes one lap file (a single JSON document, field names in whatever
/// capitalization the recorder used) into a [`LapData`].
pub fn load_lap_file(path: &Path) -> Result<LapData, LapDeltaError> {
    let file = File::open(path).map_err(|e| LapDeltaError::LapFileIo { source: e })?;
    let lap: LapData =
        serde_json::from_reader(BufReader::new(file)).map_err(|e| LapDeltaError::LapFileParse {
            path: format!("{}", path.display()),
            source: e,
        })?;
    info!(
        "Loaded lap {} for {} ({} samples) from {:?}",
        lap.lap_number,
        lap.driver,
        lap.data.len(),
        path
    );
    Ok(lap)
}
