use thiserror::Error;

/// Convenient result alias for the route planning library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A node index outside `[0, node_count)` was passed to the graph or an engine.
    #[error("node index {index} is out of range for a graph with {node_count} nodes")]
    NodeOutOfRange { index: usize, node_count: usize },

    /// Raised when two nodes would share a display name.
    #[error("duplicate node name: {name}")]
    DuplicateNode { name: String },

    /// Raised when a node name could not be found in the graph.
    #[error("unknown node name: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// The unit-weight view and the mileage graph disagree on their node sets.
    #[error("unit-weight graph has {unit} nodes but the mileage graph has {original}")]
    GraphMismatch { unit: usize, original: usize },

    /// Raised when a flight list, route file or frequency matrix cannot be parsed.
    #[error("malformed input on line {line}: {message}")]
    MalformedInput { line: usize, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
