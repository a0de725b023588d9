//! Query parameters for list endpoints

use super::models::CaseStatus;

/// Filters for `GET /expedientes/mis`
#[derive(Debug, Clone, Default)]
pub struct CaseFilterParams {
    /// Search by number or title
    pub q: Option<String>,
    pub status: Option<CaseStatus>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl CaseFilterParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query string pairs. Empty strings and zero counts are omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "q", self.q.as_deref());
        if let Some(status) = self.status {
            pairs.push(("estado", status.as_wire().to_string()));
        }
        push_count(&mut pairs, "limit", self.limit);
        push_count(&mut pairs, "offset", self.offset);
        pairs
    }
}

/// Filters for `GET /notas/mis`
#[derive(Debug, Clone, Default)]
pub struct NoteFilterParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Note type (`tipo`)
    pub kind: Option<String>,
    pub q: Option<String>,
}

impl NoteFilterParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_count(&mut pairs, "limit", self.limit);
        push_count(&mut pairs, "offset", self.offset);
        push_text(&mut pairs, "tipo", self.kind.as_deref());
        push_text(&mut pairs, "q", self.q.as_deref());
        pairs
    }
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
        pairs.push((key, v.to_string()));
    }
}

fn push_count(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<usize>) {
    if let Some(n) = value.filter(|n| *n > 0) {
        pairs.push((key, n.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params() {
        assert!(CaseFilterParams::new().to_query().is_empty());
        assert!(NoteFilterParams::default().to_query().is_empty());
    }

    #[test]
    fn test_case_params() {
        let params = CaseFilterParams {
            q: Some("laboral".to_string()),
            status: Some(CaseStatus::InProcess),
            limit: Some(20),
            offset: Some(40),
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("q", "laboral".to_string()),
                ("estado", "EN_PROCESO".to_string()),
                ("limit", "20".to_string()),
                ("offset", "40".to_string()),
            ]
        );
    }

    #[test]
    fn test_zero_and_blank_omitted() {
        let params = CaseFilterParams {
            q: Some("   ".to_string()),
            status: None,
            limit: Some(0),
            offset: Some(0),
        };
        assert!(params.to_query().is_empty());
    }

    #[test]
    fn test_note_params() {
        let params = NoteFilterParams {
            limit: Some(10),
            offset: None,
            kind: Some("AUDIENCIA".to_string()),
            q: Some("fecha".to_string()),
        };
        assert_eq!(
            params.to_query(),
            vec![
                ("limit", "10".to_string()),
                ("tipo", "AUDIENCIA".to_string()),
                ("q", "fecha".to_string()),
            ]
        );
    }
}
