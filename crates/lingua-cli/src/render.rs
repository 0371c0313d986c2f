//! Plain-text rendering of search results.

use lingua_types::SearchResult;

/// Render ranked results, one block per hit.
pub fn format_results(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "No results.\n".to_string();
    }

    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "Result {} • Relevance: {:.1}% [{}]\n",
            i + 1,
            result.score * 100.0,
            result.relevance().as_str().to_uppercase()
        ));
        out.push_str(&format!("  [{}] {}\n\n", result.language, result.text));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_types::Document;

    #[test]
    fn test_format_results() {
        let results = vec![
            SearchResult::new(&Document::new(0, "Irish", "Ceol traidisiúnta"), 0.832),
            SearchResult::new(&Document::new(7, "Spanish", "Arte español"), 0.41),
        ];
        let text = format_results(&results);
        assert!(text.contains("Result 1 • Relevance: 83.2% [HIGH]"));
        assert!(text.contains("  [Irish] Ceol traidisiúnta"));
        assert!(text.contains("Result 2 • Relevance: 41.0% [LOW]"));
    }

    #[test]
    fn test_format_no_results() {
        assert_eq!(format_results(&[]), "No results.\n");
    }
}
