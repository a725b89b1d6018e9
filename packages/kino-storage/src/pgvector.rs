//! Text-form codec for pgvector columns. Stored payloads are decoded by a
//! strict numeric parser that fails closed: anything but a bracketed list
//! of finite numbers of the expected length is a record-level data
//! integrity error, and stored content is never evaluated.

use crate::{Error, Result};

pub fn vector_to_pg(vector: &[f32]) -> String {
	let mut out = String::with_capacity(vector.len() * 8);

	out.push('[');

	for (i, value) in vector.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}

		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}

pub fn parse_pg_vector(text: &str, expected_dim: u32) -> Result<Vec<f32>> {
	let trimmed = text.trim();
	let without_brackets = trimmed
		.strip_prefix('[')
		.and_then(|s| s.strip_suffix(']'))
		.ok_or_else(|| Error::DataIntegrity("Vector text is not bracketed.".to_string()))?;
	let mut vector = Vec::with_capacity(expected_dim as usize);

	if !without_brackets.trim().is_empty() {
		for part in without_brackets.split(',') {
			let value: f32 = part.trim().parse().map_err(|_| {
				Error::DataIntegrity("Vector text contains a non-numeric value.".to_string())
			})?;

			if !value.is_finite() {
				return Err(Error::DataIntegrity(
					"Vector text contains a non-finite value.".to_string(),
				));
			}

			vector.push(value);
		}
	}

	if vector.len() != expected_dim as usize {
		return Err(Error::DataIntegrity(format!(
			"Vector has {} dimensions, expected {expected_dim}.",
			vector.len()
		)));
	}

	Ok(vector)
}
