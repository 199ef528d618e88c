/// Renders the bootstrap DDL. Statements are separated by `;` and must not
/// contain one internally; `Db::ensure_schema` splits on it.
pub fn render_schema() -> String {
	r#"
CREATE TABLE IF NOT EXISTS creators (
	creator_id UUID PRIMARY KEY,
	public_id UUID NOT NULL UNIQUE,
	device_name TEXT,
	moderated BOOLEAN NOT NULL DEFAULT FALSE,
	created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS casts (
	cast_id UUID PRIMARY KEY,
	creator_id UUID NOT NULL REFERENCES creators (creator_id),
	created_at TIMESTAMPTZ NOT NULL,
	day_bucket BIGINT NOT NULL,
	cell_id BIGINT NOT NULL,
	latitude DOUBLE PRECISION NOT NULL,
	longitude DOUBLE PRECISION NOT NULL,
	accuracy_m DOUBLE PRECISION NOT NULL,
	media_url TEXT NOT NULL,
	deleted BOOLEAN NOT NULL DEFAULT FALSE,
	moderated BOOLEAN NOT NULL DEFAULT FALSE
);

CREATE INDEX IF NOT EXISTS casts_day_bucket_cell_id ON casts (day_bucket, cell_id);

CREATE TABLE IF NOT EXISTS cast_flags (
	cast_id UUID NOT NULL REFERENCES casts (cast_id),
	reporter_id UUID NOT NULL REFERENCES creators (creator_id),
	created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
	PRIMARY KEY (cast_id, reporter_id)
)
"#
	.to_string()
}
