use kino_config::Vectors;

pub fn render_schema(dims: &Vectors) -> String {
	let init = include_str!("../../../sql/init.sql");
	let expanded = expand_includes(init);

	expanded
		.replace("<COLLABORATIVE_DIM>", &dims.collaborative_dim.to_string())
		.replace("<SEMANTIC_DIM>", &dims.semantic_dim.to_string())
		.replace("<TOPIC_DIM>", &dims.topic_dim.to_string())
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"00_extensions.sql" => out.push_str(include_str!("../../../sql/00_extensions.sql")),
				"tables/001_movies.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_movies.sql")),
				"tables/002_movie_vectors.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_movie_vectors.sql")),
				"tables/003_user_ratings.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_user_ratings.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
