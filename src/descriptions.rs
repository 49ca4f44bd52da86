//! Static climate descriptions keyed by locality name.

use crate::records::error::RecordStoreError;
use std::collections::HashMap;
use std::path::Path;

/// Returned for localities without a description.
pub const NO_DESCRIPTION: &str = "Información climática no disponible.";

const DEFAULT_DESCRIPTIONS: [(&str, &str); 7] = [
    (
        "Amecameca de Juarez",
        "El clima en Amecameca, Estado de México, es templado subhúmedo con lluvias principalmente en verano y otoño. La temperatura máxima puede llegar a los 32°C y la mínima a -8°C, con una media anual de 14.1°C.",
    ),
    (
        "Atlautla",
        "El clima en Atlautla, Estado de México, es generalmente subhúmedo con lluvias en verano. La temperatura promedio anual varía entre 2°C y 20°C. Se encuentra a una elevación de 2,355 metros sobre el nivel del mar.",
    ),
    (
        "Juchitepec",
        "El clima en Juchitepec es templado subhúmedo, con temperaturas promedio anuales que oscilan entre 16 y 25 grados Celsius. Durante el verano, las temperaturas pueden alcanzar los 30 grados, mientras que en invierno pueden bajar a menos de 6 grados, con vientos fuertes.",
    ),
    (
        "San Luis Ameca",
        "El clima en San Luis Ameca se caracteriza por ser semicálido semihúmedo. La temperatura media anual es de 20.7°C, con mínimas promedio de 8.5°C y máximas de 32.9°C. La precipitación media anual es de 924 mm.",
    ),
    (
        "San Pedro Nexapa",
        "En San Pedro Nexapa, el clima es templado subhúmedo, con una temperatura media anual de alrededor de 14°C. La temperatura media máxima mensual puede alcanzar los 20°C, mientras que la mínima puede descender hasta los 10°C. La probabilidad de lluvia es alta, con un promedio de 25 días de lluvia al mes.",
    ),
    (
        "San Rafael",
        "El clima en San Rafael, Estado de México, es generalmente templado subhúmedo con lluvias en verano. La temperatura media anual varía entre 22° y 30°C, y la precipitación total anual oscila entre 800 y 1200 mm.",
    ),
    (
        "Tlalmanalco",
        "Tlalmanalco, Estado de México, tiene un clima templado subhúmedo con lluvias en verano. La temperatura promedio anual es de 15°C. La precipitación pluvial anual varía entre 800 y 1200 mm, con mayor intensidad de lluvias en julio y agosto.",
    ),
];

/// Read-only mapping from exact (case-sensitive, trimmed) locality name to text.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptions {
    entries: HashMap<String, String>,
}

impl Default for Descriptions {
    /// The built-in descriptions of the Amecameca region localities.
    fn default() -> Self {
        Self::from_entries(
            DEFAULT_DESCRIPTIONS
                .iter()
                .map(|(name, text)| (name.to_string(), text.to_string())),
        )
    }
}

impl Descriptions {
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Loads a JSON object of `{ "locality": "description" }` pairs.
    pub fn from_json_file(path: &Path) -> Result<Self, RecordStoreError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| RecordStoreError::DescriptionRead(path.to_path_buf(), e))?;
        let entries: HashMap<String, String> = serde_json::from_str(&contents)
            .map_err(|e| RecordStoreError::DescriptionParse(path.to_path_buf(), e))?;
        Ok(Self { entries })
    }

    /// The description of `locality`, or [`NO_DESCRIPTION`].
    pub fn get(&self, locality: &str) -> &str {
        self.entries
            .get(locality)
            .map_or(NO_DESCRIPTION, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_table() {
        let descriptions = Descriptions::default();
        assert_eq!(descriptions.len(), 7);
        assert!(descriptions.get("Tlalmanalco").starts_with("Tlalmanalco, Estado de México"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let descriptions = Descriptions::default();
        assert_eq!(descriptions.get("tlalmanalco"), NO_DESCRIPTION);
        assert_eq!(descriptions.get("Tlalmanalco "), NO_DESCRIPTION);
        assert_eq!(descriptions.get("Nowhere"), NO_DESCRIPTION);
    }

    #[test]
    fn test_from_json_file() -> Result<(), RecordStoreError> {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("descriptions.json");
        fs::write(&path, r#"{"Atlautla": "Templado."}"#).expect("write table");

        let descriptions = Descriptions::from_json_file(&path)?;
        assert_eq!(descriptions.get("Atlautla"), "Templado.");
        assert_eq!(descriptions.get("Juchitepec"), NO_DESCRIPTION);
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("descriptions.json");
        fs::write(&path, "[1, 2]").expect("write table");
        assert!(matches!(
            Descriptions::from_json_file(&path),
            Err(RecordStoreError::DescriptionParse(..))
        ));
    }
}
