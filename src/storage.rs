use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    constants::SAMPLE_SET,
    domain::{CellRef, GameSession, Player},
};

/// On-disk record of a game in progress, written when the player quits and
/// restored by `play --resume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub set_path: PathBuf,
    pub delimiter: String,
    pub qualifier: String,
    pub players: Vec<PlayerSnapshot>,
    pub used_cells: Vec<CellSnapshot>,
}

impl GameSnapshot {
    pub const VERSION: u32 = 1;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub final_round: bool,
    pub col: usize,
    pub row: usize,
}

impl From<CellRef> for CellSnapshot {
    fn from(cell: CellRef) -> Self {
        match cell {
            CellRef::Board { col, row } => CellSnapshot {
                final_round: false,
                col,
                row,
            },
            CellRef::Final { row } => CellSnapshot {
                final_round: true,
                col: 0,
                row,
            },
        }
    }
}

impl From<CellSnapshot> for CellRef {
    fn from(cell: CellSnapshot) -> Self {
        if cell.final_round {
            CellRef::Final { row: cell.row }
        } else {
            CellRef::Board {
                col: cell.col,
                row: cell.row,
            }
        }
    }
}

pub fn snapshot_from_session(
    session: &GameSession,
    set_path: &Path,
    delimiter: &str,
    qualifier: &str,
) -> GameSnapshot {
    GameSnapshot {
        version: GameSnapshot::VERSION,
        saved_at: Utc::now(),
        set_path: set_path.to_path_buf(),
        delimiter: delimiter.to_string(),
        qualifier: qualifier.to_string(),
        players: session
            .players
            .iter()
            .map(|player| PlayerSnapshot {
                name: player.name.clone(),
                score: player.score,
            })
            .collect(),
        used_cells: session
            .used_cells()
            .into_iter()
            .map(CellSnapshot::from)
            .collect(),
    }
}

/// Restores roster and board state onto a freshly built session. Cells that
/// no longer exist in the set are ignored.
pub fn apply_snapshot(session: &mut GameSession, snapshot: &GameSnapshot) {
    session.players = snapshot
        .players
        .iter()
        .map(|player| Player {
            name: player.name.clone(),
            score: player.score,
        })
        .collect();

    for cell in &snapshot.used_cells {
        session.mark_used(CellRef::from(*cell));
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "quizboard", "quizboard") {
        if let Some(state_dir) = proj_dirs.state_dir() {
            let dir = state_dir.to_path_buf();
            fs::create_dir_all(&dir).ok();
            return dir;
        }
        let dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&dir).ok();
        return dir;
    }
    PathBuf::from(".")
}

pub fn get_snapshot_path() -> PathBuf {
    get_state_dir().join("saved_game.json")
}

pub fn load_snapshot(path: &Path) -> Option<GameSnapshot> {
    if !path.exists() {
        return None;
    }

    match read_json::<GameSnapshot>(path) {
        Ok(snapshot) if snapshot.version == GameSnapshot::VERSION => Some(snapshot),
        Ok(_) => {
            eprintln!("Warning: Unsupported saved game version, ignoring it");
            None
        }
        Err(e) => {
            eprintln!("Warning: Could not load saved game: {}", e);
            None
        }
    }
}

pub fn save_snapshot(path: &Path, snapshot: &GameSnapshot) -> Result<(), String> {
    write_json_atomic(path, snapshot)
}

pub fn read_question_set(path: &Path) -> Result<String, String> {
    fs::read_to_string(path)
        .map_err(|e| format!("Could not read question set '{}': {}", path.display(), e))
}

pub fn write_sample_set(path: &Path) -> Result<(), String> {
    atomic_write(path, SAMPLE_SET)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&content).map_err(|e| e.to_string())
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    atomic_write(path, &json)
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), String> {
    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| e.to_string())?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| e.to_string())?;
    tmp_file.sync_all().map_err(|e| e.to_string())?;
    fs::rename(&tmp_path, path).map_err(|e| e.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;
    use crate::{
        catalog::build_catalog,
        constants::{DEFAULT_DELIMITER, DEFAULT_QUALIFIER},
        parser::parse_delimited,
    };

    fn unique_path(prefix: &str, extension: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}.{}", prefix, now, extension))
    }

    fn sample_session() -> GameSession {
        let records = parse_delimited(SAMPLE_SET, DEFAULT_DELIMITER, DEFAULT_QUALIFIER);
        let catalog = build_catalog(&records).unwrap();
        GameSession::new(catalog, &["Team 1".to_string(), "Team 2".to_string()])
    }

    #[test]
    fn test_sample_set_builds_a_catalog() {
        let records = parse_delimited(SAMPLE_SET, DEFAULT_DELIMITER, DEFAULT_QUALIFIER);
        let catalog = build_catalog(&records).unwrap();

        assert_eq!(catalog.categories.len(), 3);
        assert_eq!(catalog.max_in_category, 3);
        assert_eq!(catalog.final_round.len(), 1);
        // The doubled qualifier in the sample decodes to literal quotes.
        assert_eq!(
            catalog.categories[0].questions[2].answer,
            "The \"borrow checker\" enforces this property of references"
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let path = unique_path("quizboard_snapshot_roundtrip", "json");
        let mut session = sample_session();
        session.mark_used(CellRef::Board { col: 1, row: 2 });
        session.players[0].score = 400;

        let snapshot =
            snapshot_from_session(&session, Path::new("/tmp/set.csv"), ",", "\"");
        save_snapshot(&path, &snapshot).unwrap();

        let loaded = load_snapshot(&path).expect("snapshot should load");
        assert_eq!(loaded, snapshot);

        let mut restored = sample_session();
        apply_snapshot(&mut restored, &loaded);
        assert_eq!(restored.players[0].score, 400);
        assert!(restored.is_used(CellRef::Board { col: 1, row: 2 }));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_snapshot_version_mismatch_is_ignored() {
        let path = unique_path("quizboard_snapshot_version", "json");
        let session = sample_session();
        let mut snapshot =
            snapshot_from_session(&session, Path::new("/tmp/set.csv"), ",", "\"");
        snapshot.version = GameSnapshot::VERSION + 1;
        save_snapshot(&path, &snapshot).unwrap();

        assert!(load_snapshot(&path).is_none());

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_snapshot_ignores_cells_missing_from_set() {
        let mut session = sample_session();
        let snapshot = GameSnapshot {
            version: GameSnapshot::VERSION,
            saved_at: Utc::now(),
            set_path: PathBuf::from("/tmp/set.csv"),
            delimiter: ",".to_string(),
            qualifier: "\"".to_string(),
            players: vec![PlayerSnapshot {
                name: "Solo".to_string(),
                score: 100,
            }],
            used_cells: vec![CellSnapshot {
                final_round: false,
                col: 9,
                row: 9,
            }],
        };

        apply_snapshot(&mut session, &snapshot);
        assert_eq!(session.players.len(), 1);
        assert!(!session.is_used(CellRef::Board { col: 9, row: 9 }));
    }

    #[test]
    fn test_write_sample_set() {
        let path = unique_path("quizboard_sample_set", "csv");
        write_sample_set(&path).unwrap();

        let text = read_question_set(&path).unwrap();
        assert_eq!(text, SAMPLE_SET);

        fs::remove_file(path).ok();
    }
}
