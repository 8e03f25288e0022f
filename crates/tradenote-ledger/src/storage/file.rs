//! 파일 슬롯 저장소.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tradenote_core::TradeRecord;

use super::{codec, PersistenceStore};
use crate::error::StoreResult;

/// 하나의 JSON 파일에 전체 컬렉션을 저장하는 저장소.
///
/// 저장은 같은 디렉토리의 임시 파일에 기록하고 flush한 뒤 슬롯 위로 rename합니다.
/// 따라서 읽는 쪽은 이전 스냅샷 또는 새 스냅샷 중 하나만 보게 됩니다.
///
/// 변경 구간 잠금은 인스턴스 단위입니다. 같은 파일을 여러 원장이 쓰려면
/// 하나의 `Arc<JsonFileStore>`를 공유해야 합니다.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// 지정한 경로를 슬롯으로 사용하는 저장소를 생성합니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// 슬롯 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PersistenceStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<TradeRecord>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        codec::decode(&bytes)
    }

    fn save(&self, records: &[TradeRecord]) -> StoreResult<()> {
        let bytes = codec::encode(records)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        Ok(())
    }

    fn mutation_lock(&self) -> &Mutex<()> {
        &self.lock
    }

    fn name(&self) -> &str {
        "json_file"
    }
}
