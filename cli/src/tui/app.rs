use anyhow::Result;
use ratatui::widgets::TableState;

use matriz_core::{
    FileCollaboratorRepository, FilePerDiemRepository, RequestDto, RequestService,
};

pub struct App {
    pub service: RequestService<FilePerDiemRepository, FileCollaboratorRepository>,
    pub requests: Vec<RequestDto>,
    pub state: TableState,
}

impl App {
    pub fn new() -> Result<App> {
        let request_repo = FilePerDiemRepository::new(None)?;
        let collaborator_repo = FileCollaboratorRepository::new(None)?;
        let service = RequestService::new(request_repo, collaborator_repo);

        let requests = service.list().unwrap_or_default();
        let mut state = TableState::default();
        if !requests.is_empty() {
            state.select(Some(0));
        }
        Ok(App {
            service,
            requests,
            state,
        })
    }

    pub fn next(&mut self) {
        if self.requests.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.requests.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.requests.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.requests.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn delete_selected(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(request) = self.requests.get(i) {
                let _ = self.service.delete(&request.id);
            }
            self.reload();

            // Adjust selection after reload
            if self.requests.is_empty() {
                self.state.select(None);
            } else if i >= self.requests.len() {
                self.state.select(Some(self.requests.len() - 1));
            } else {
                self.state.select(Some(i));
            }
        }
    }

    pub fn reload(&mut self) {
        if let Ok(requests) = self.service.list() {
            self.requests = requests;
        }
    }

    pub fn selected_request(&self) -> Option<&RequestDto> {
        self.state.selected().and_then(|i| self.requests.get(i))
    }
}
