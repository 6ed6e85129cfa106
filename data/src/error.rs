/// Errors that stop the pipeline before any scan is processed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Neither the remote dataset nor a cached copy could be loaded.
	#[error("card dataset unavailable (remote: {remote:#}; cache: {cache:#})")]
	DictionaryUnavailable {
		remote: anyhow::Error,
		cache: anyhow::Error,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_display_dictionary_unavailable() {
		let error = Error::DictionaryUnavailable {
			remote: anyhow::anyhow!("connection refused").context("GET cards"),
			cache: anyhow::anyhow!("No cache_dir available"),
		};
		let display = error.to_string();
		assert!(display.starts_with("card dataset unavailable"));
		assert!(display.contains("GET cards: connection refused"));
		assert!(display.contains("No cache_dir available"));
	}
}
