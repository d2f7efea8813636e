use super::ResourceKind;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

/// Processing state shared by collections and searches.
///
/// Serialized as the backend's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ProcessingStatus {
    Failed,
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl ProcessingStatus {
    pub const ALL: [ProcessingStatus; 4] = [
        ProcessingStatus::Failed,
        ProcessingStatus::Pending,
        ProcessingStatus::InProgress,
        ProcessingStatus::Completed,
    ];

    pub fn code(self) -> i64 {
        match self {
            ProcessingStatus::Failed => -1,
            ProcessingStatus::Pending => 0,
            ProcessingStatus::InProgress => 1,
            ProcessingStatus::Completed => 2,
        }
    }

    /// Whether the backend has stopped working on the resource.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessingStatus::Failed | ProcessingStatus::Completed)
    }
}

/// Integer that is not one of the known status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownStatusCode(pub i64);

impl fmt::Display for UnknownStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown processing status code: {}", self.0)
    }
}

impl std::error::Error for UnknownStatusCode {}

impl TryFrom<i64> for ProcessingStatus {
    type Error = UnknownStatusCode;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            -1 => Ok(ProcessingStatus::Failed),
            0 => Ok(ProcessingStatus::Pending),
            1 => Ok(ProcessingStatus::InProgress),
            2 => Ok(ProcessingStatus::Completed),
            other => Err(UnknownStatusCode(other)),
        }
    }
}

impl From<ProcessingStatus> for i64 {
    fn from(status: ProcessingStatus) -> Self {
        status.code()
    }
}

/// How a status is rendered: icon name, title, description and whether the
/// resource may be deleted while in that status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDisplay {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub show_delete: bool,
}

// Indexed by `code + 1`.
static COLLECTION_STATUS: [StatusDisplay; 4] = [
    StatusDisplay {
        icon: "PhotoX",
        title: "Processamento falhou",
        description: "Ocorreu um erro durante o processamento da coleção.",
        show_delete: true,
    },
    StatusDisplay {
        icon: "PhotoPause",
        title: "Descompactando Coleção",
        description: "Aguarde até finalizar o processo de descompactação",
        show_delete: false,
    },
    StatusDisplay {
        icon: "PhotoScan",
        title: "Indexando coleção",
        description: "Aguarde até que o processo de indexação de faces seja concluído.",
        show_delete: false,
    },
    StatusDisplay {
        icon: "PhotoCheck",
        title: "Processamento concluído",
        description: "Processamento da coleção finalizado com sucesso.",
        show_delete: true,
    },
];

static SEARCH_STATUS: [StatusDisplay; 4] = [
    StatusDisplay {
        icon: "UserX",
        title: "Pesquisa falhou",
        description: "Ocorreu um erro durante o processamento da pesquisa.",
        show_delete: true,
    },
    StatusDisplay {
        icon: "UserPause",
        title: "Pesquisa em espera",
        description: "Aguarde até o início do processamento da pesquisa.",
        show_delete: false,
    },
    StatusDisplay {
        icon: "UserScan",
        title: "Pesquisa em processamento",
        description: "Aguarde até que o processo de pesquisa seja concluído.",
        show_delete: false,
    },
    StatusDisplay {
        icon: "UserCheck",
        title: "Pesquisa concluída",
        description: "A pesquisa foi concluída com sucesso.",
        show_delete: true,
    },
];

fn table_index(status: ProcessingStatus) -> usize {
    (status.code() + 1) as usize
}

pub fn collection_status(status: ProcessingStatus) -> &'static StatusDisplay {
    &COLLECTION_STATUS[table_index(status)]
}

pub fn search_status(status: ProcessingStatus) -> &'static StatusDisplay {
    &SEARCH_STATUS[table_index(status)]
}

pub fn status_display(kind: ResourceKind, status: ProcessingStatus) -> &'static StatusDisplay {
    match kind {
        ResourceKind::Collections => collection_status(status),
        ResourceKind::Searches => search_status(status),
    }
}

/// Lookup by raw integer code; `None` for codes outside `-1..=2`.
pub fn lookup(kind: ResourceKind, code: i64) -> Option<&'static StatusDisplay> {
    ProcessingStatus::try_from(code)
        .ok()
        .map(|status| status_display(kind, status))
}
