//! Wire types for the slice of the SerpAPI response we consume.
//!
//! Every section is optional on the wire; missing sections deserialize to
//! empty defaults and simply contribute nothing downstream.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SerpApiResponse {
    #[serde(default)]
    pub organic_results: Vec<SerpOrganicResult>,
    #[serde(default)]
    pub shopping_results: Vec<SerpShoppingResult>,
    #[serde(default)]
    pub knowledge_graph: Option<SerpKnowledgeGraph>,
    #[serde(default)]
    pub related_searches: Vec<SerpRelatedSearch>,
    /// Present when the API rejected the request despite a 200 status.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SerpOrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SerpShoppingResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SerpKnowledgeGraph {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SerpRelatedSearch {
    #[serde(default)]
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_response() {
        let json = r#"{
            "organic_results": [
                {"title": "Moda 2025", "snippet": "tendências", "link": "https://a.example"}
            ],
            "related_searches": [{"query": "moda verão"}]
        }"#;
        let response: SerpApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.organic_results.len(), 1);
        assert!(response.shopping_results.is_empty());
        assert!(response.knowledge_graph.is_none());
        assert_eq!(response.related_searches[0].query, "moda verão");
        assert!(response.error.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = r#"{"search_metadata": {"id": "abc"}, "organic_results": []}"#;
        let response: SerpApiResponse = serde_json::from_str(json).unwrap();
        assert!(response.organic_results.is_empty());
    }

    #[test]
    fn missing_subfields_default_to_empty() {
        let json = r#"{"organic_results": [{"title": "só título"}]}"#;
        let response: SerpApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.organic_results[0].title, "só título");
        assert!(response.organic_results[0].snippet.is_empty());
        assert!(response.organic_results[0].link.is_empty());
    }
}
