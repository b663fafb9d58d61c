use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde_json;
use uuid::Uuid;

use crate::model::request::PerDiemRequest;
use crate::repository::traits::PerDiemRepository;

const DEFAULT_FILE_NAME: &str = "requests.json";

#[derive(Clone)]
pub struct FilePerDiemRepository {
    file_path: PathBuf,
}

impl FilePerDiemRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(".matriz")
            }
        };
        fs::create_dir_all(&path)?;
        path.push(DEFAULT_FILE_NAME);

        // Seed an empty registry on first run.
        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<PerDiemRequest>::new())?;
            writer.flush()?;
        }

        Ok(FilePerDiemRepository { file_path: path })
    }

    fn read_requests(&self) -> Result<Vec<PerDiemRequest>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let requests = serde_json::from_reader(reader)?;
        Ok(requests)
    }

    fn write_requests(&self, requests: &[PerDiemRequest]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, requests)?;
        writer.flush()?;
        Ok(())
    }
}

impl PerDiemRepository for FilePerDiemRepository {
    fn create(&self, request: PerDiemRequest) -> Result<PerDiemRequest> {
        let mut requests = self.read_requests()?;
        requests.push(request.clone());
        self.write_requests(&requests)?;
        Ok(request)
    }

    fn list(&self) -> Result<Vec<PerDiemRequest>> {
        self.read_requests()
    }

    fn get(&self, id: &Uuid) -> Result<PerDiemRequest> {
        self.read_requests()?
            .into_iter()
            .find(|r| r.id == *id)
            .ok_or_else(|| anyhow!("Request with ID {} not found", id))
    }

    fn update(&self, request: &PerDiemRequest) -> Result<()> {
        let mut requests = self.read_requests()?;
        if let Some(pos) = requests.iter().position(|r| r.id == request.id) {
            requests[pos] = request.clone();
            self.write_requests(&requests)?;
            Ok(())
        } else {
            Err(anyhow!("Request with ID {} not found", request.id))
        }
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut requests = self.read_requests()?;
        let initial_len = requests.len();
        requests.retain(|r| r.id != *id);

        if requests.len() == initial_len {
            return Err(anyhow!("Request with ID {} not found", id));
        }

        self.write_requests(&requests)?;
        Ok(())
    }
}
