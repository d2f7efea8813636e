use serde::{Deserialize, Serialize};

/// Language used for user-facing validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    /// Brazilian Portuguese, the language of the web client.
    #[default]
    #[serde(rename = "pt-BR", alias = "pt_br", alias = "pt")]
    PtBr,
    #[serde(rename = "en", alias = "en-US")]
    En,
}

impl Locale {
    pub fn required(self) -> String {
        match self {
            Locale::PtBr => "Este campo é obrigatório".to_string(),
            Locale::En => "This field is required".to_string(),
        }
    }

    pub fn invalid_email(self) -> String {
        match self {
            Locale::PtBr => "Este campo deve ser um email válido".to_string(),
            Locale::En => "This field must be a valid email".to_string(),
        }
    }

    pub fn too_short(self, min: usize) -> String {
        match self {
            Locale::PtBr => format!("Este campo deve ter pelo menos {min} caracteres"),
            Locale::En => format!("This field must have at least {min} characters"),
        }
    }

    pub fn too_long(self, max: usize) -> String {
        match self {
            Locale::PtBr => format!("Este campo deve ter no máximo {max} caracteres"),
            Locale::En => format!("This field must have at most {max} characters"),
        }
    }

    pub fn mismatch(self) -> String {
        match self {
            Locale::PtBr => "Os valores não coincidem".to_string(),
            Locale::En => "The values do not match".to_string(),
        }
    }
}
