use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde_json;
use uuid::Uuid;

use crate::model::collaborator::Collaborator;
use crate::repository::traits::CollaboratorRepository;

const COLLABORATOR_FILE_NAME: &str = "collaborators.json";

#[derive(Clone)]
pub struct FileCollaboratorRepository {
    file_path: PathBuf,
}

impl FileCollaboratorRepository {
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
        path.push(COLLABORATOR_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<Collaborator>::new())?;
            writer.flush()?;
        }

        Ok(FileCollaboratorRepository { file_path: path })
    }

    fn read_collaborators(&self) -> Result<Vec<Collaborator>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let collaborators = serde_json::from_reader(reader)?;
        Ok(collaborators)
    }

    fn write_collaborators(&self, collaborators: &[Collaborator]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, collaborators)?;
        writer.flush()?;
        Ok(())
    }
}

impl CollaboratorRepository for FileCollaboratorRepository {
    fn create(&self, collaborator: Collaborator) -> Result<Collaborator> {
        let mut collaborators = self.read_collaborators()?;
        collaborators.push(collaborator.clone());
        self.write_collaborators(&collaborators)?;
        Ok(collaborator)
    }

    fn list(&self) -> Result<Vec<Collaborator>> {
        self.read_collaborators()
    }

    fn get(&self, id: &Uuid) -> Result<Collaborator> {
        self.read_collaborators()?
            .into_iter()
            .find(|c| c.id == *id)
            .ok_or_else(|| anyhow!("Collaborator with ID {} not found", id))
    }

    fn update(&self, collaborator: &Collaborator) -> Result<()> {
        let mut collaborators = self.read_collaborators()?;
        if let Some(pos) = collaborators.iter().position(|c| c.id == collaborator.id) {
            collaborators[pos] = collaborator.clone();
            self.write_collaborators(&collaborators)?;
            Ok(())
        } else {
            Err(anyhow!("Collaborator with ID {} not found", collaborator.id))
        }
    }

    fn delete(&self, id: &Uuid) -> Result<()> {
        let mut collaborators = self.read_collaborators()?;
        let initial_len = collaborators.len();
        collaborators.retain(|c| c.id != *id);

        if collaborators.len() == initial_len {
            return Err(anyhow!("Collaborator with ID {} not found", id));
        }

        self.write_collaborators(&collaborators)?;
        Ok(())
    }
}
