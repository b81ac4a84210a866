//! Adaptation from SerpAPI wire types to the provider-agnostic model.

use ftdb_analysis::{KnowledgePanel, OrganicHit, SearchResult, ShoppingHit};

use crate::types::SerpApiResponse;

/// Normalize a SerpAPI response into the core `SearchResult` shape.
///
/// A knowledge graph with neither title nor description is treated as
/// absent so it cannot trigger the flat score bonus.
#[must_use]
pub fn normalize_response(raw: SerpApiResponse) -> SearchResult {
    SearchResult {
        organic: raw
            .organic_results
            .into_iter()
            .map(|r| OrganicHit {
                title: r.title,
                snippet: r.snippet,
                url: r.link,
            })
            .collect(),
        shopping: raw
            .shopping_results
            .into_iter()
            .map(|r| ShoppingHit {
                title: r.title,
                source: r.source,
                url: r.link,
            })
            .collect(),
        knowledge_panel: raw.knowledge_graph.and_then(|kg| {
            if kg.title.is_empty() && kg.description.is_empty() {
                None
            } else {
                Some(KnowledgePanel {
                    title: kg.title,
                    description: kg.description,
                })
            }
        }),
        related_searches: raw
            .related_searches
            .into_iter()
            .map(|r| r.query)
            .filter(|q| !q.is_empty())
            .collect(),
    }
}
