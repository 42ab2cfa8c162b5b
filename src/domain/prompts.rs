use std::fmt;

use crate::domain::uploads::UploadedAsset;

/// Style used when the client sends none (or an empty one).
pub const DEFAULT_STYLE: &str = "moderne";

/// Number of suggestions the model is asked for.
pub const REQUESTED_SUGGESTIONS: usize = 5;

/// One redecoration request: the stored photo plus the wanted style.
#[derive(Debug, Clone)]
pub struct DecorationRequest {
    pub style: String,
    pub image: UploadedAsset,
}

impl DecorationRequest {
    pub fn new(style: Option<String>, image: UploadedAsset) -> Self {
        let style = style
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STYLE.to_string());
        Self { style, image }
    }
}

/// Instruction sent as the user turn to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt(String);

impl GenerationPrompt {
    /// Render the fixed decorator template. Pure: no I/O, and the style is
    /// inserted verbatim however long it is.
    pub fn build(style: &str, public_image_url: &str) -> Self {
        Self(format!(
            "\nTu es un décorateur d'intérieur professionnel.\n\
             L'utilisateur a fourni une photo (accessible à {public_image_url}) et souhaite un style : {style}.\n\
             Donne {REQUESTED_SUGGESTIONS} suggestions courtes, concrètes et actionnables pour redécorer la pièce (meubles, couleurs, accessoires, texture, éclairage).\n\
             Répond en JSON avec une clé \"suggestions\" contenant un tableau de {REQUESTED_SUGGESTIONS} strings.\n"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenerationPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
