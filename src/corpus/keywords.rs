// KeywordCorpus: the weighted keyword lists behind each axis endpoint.
//
// Endpoints come in consecutive pairs. Pair i = (2i, 2i+1) is one bipolar
// axis, read as "<endpoint A> | <endpoint B>", where a positive axis value
// leans towards B.

use std::collections::HashSet;

use crate::error::{Result, VectorError};

/// A keyword and how much one occurrence of it counts.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedKeyword {
    pub keyword: String,
    pub weight: f64,
}

impl WeightedKeyword {
    pub fn new(keyword: impl Into<String>, weight: f64) -> Self {
        Self {
            keyword: keyword.into(),
            weight,
        }
    }
}

/// One pole of a bipolar axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub name: String,
    pub keywords: Vec<WeightedKeyword>,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, keywords: Vec<WeightedKeyword>) -> Self {
        Self {
            name: name.into(),
            keywords,
        }
    }
}

/// Validated, immutable collection of axis endpoints in axis order.
#[derive(Debug, Clone)]
pub struct KeywordCorpus {
    endpoints: Vec<Endpoint>,
}

impl KeywordCorpus {
    /// Validate the endpoint list and build the corpus.
    ///
    /// Rejects an empty or odd-length endpoint list, repeated endpoint names,
    /// empty keywords and weights that are negative or not finite. Repeated
    /// (keyword, weight) pairs inside one endpoint collapse to the first one.
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(VectorError::MalformedCorpus(
                "no axis endpoints found".to_string(),
            ));
        }
        if endpoints.len() % 2 != 0 {
            return Err(VectorError::MalformedCorpus(format!(
                "{} endpoints cannot be paired into bipolar axes (last: {:?})",
                endpoints.len(),
                endpoints[endpoints.len() - 1].name
            )));
        }

        let mut names: HashSet<&str> = HashSet::new();
        for endpoint in &endpoints {
            if !names.insert(endpoint.name.as_str()) {
                return Err(VectorError::MalformedCorpus(format!(
                    "endpoint {:?} appears more than once",
                    endpoint.name
                )));
            }
        }

        let mut validated = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let mut seen: HashSet<(String, u64)> = HashSet::new();
            let mut keywords = Vec::with_capacity(endpoint.keywords.len());

            for kw in endpoint.keywords {
                if kw.keyword.is_empty() {
                    return Err(VectorError::MalformedCorpus(format!(
                        "empty keyword in endpoint {:?}",
                        endpoint.name
                    )));
                }
                if !kw.weight.is_finite() || kw.weight < 0.0 {
                    return Err(VectorError::InvalidWeight {
                        endpoint: endpoint.name.clone(),
                        keyword: kw.keyword,
                        value: kw.weight.to_string(),
                    });
                }
                if seen.insert((kw.keyword.clone(), kw.weight.to_bits())) {
                    keywords.push(kw);
                }
            }

            validated.push(Endpoint {
                name: endpoint.name,
                keywords,
            });
        }

        Ok(Self {
            endpoints: validated,
        })
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Number of bipolar axes (half the endpoint count).
    pub fn axis_count(&self) -> usize {
        self.endpoints.len() / 2
    }

    /// Axis names in axis order, formatted "<A> | <B>".
    pub fn axis_names(&self) -> Vec<String> {
        self.endpoints
            .chunks_exact(2)
            .map(|pair| format!("{} | {}", pair[0].name, pair[1].name))
            .collect()
    }
}

/// Coerce a weight cell to a float.
///
/// A missing or blank cell counts as 1.0. Anything that does not parse as a
/// finite, non-negative number is an `InvalidWeight`.
pub fn coerce_weight(endpoint: &str, keyword: &str, raw: Option<&str>) -> Result<f64> {
    let text = match raw.map(str::trim) {
        None | Some("") => return Ok(1.0),
        Some(text) => text,
    };

    match text.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => Err(VectorError::InvalidWeight {
            endpoint: endpoint.to_string(),
            keyword: keyword.to_string(),
            value: text.to_string(),
        }),
    }
}
