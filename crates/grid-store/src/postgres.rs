//! PostgreSQL grid store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use tracing::{debug, info};

use nogo_common::{
    DepthSample, GeoPoint, GridIndex, NogoError, NogoResult, RegionName, TideSample, TimeWindow,
};

use crate::store::{GridKind, GridStore};

/// Default search radius for nearest-sample lookups, in degrees.
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 0.01;

/// Connection settings for the PostgreSQL store.
#[derive(Debug, Clone)]
pub struct PgGridStoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    /// A corner farther than this from every sample is outside the grid.
    pub search_radius_deg: f64,
}

impl PgGridStoreConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            search_radius_deg: DEFAULT_SEARCH_RADIUS_DEG,
        }
    }
}

/// Grid store reading depth and tide samples from PostgreSQL.
pub struct PgGridStore {
    pool: PgPool,
    search_radius_deg: f64,
}

impl PgGridStore {
    /// Create a new store connection.
    pub async fn connect(config: &PgGridStoreConfig) -> NogoResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(|e| NogoError::DatabaseError(format!("Connection failed: {}", e)))?;

        info!(
            max_connections = config.max_connections,
            search_radius_deg = config.search_radius_deg,
            "Connected to grid database"
        );

        Ok(Self {
            pool,
            search_radius_deg: config.search_radius_deg,
        })
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> NogoResult<()> {
        for statement in SCHEMA_SQL.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                sqlx::query(trimmed)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| NogoError::DatabaseError(format!("Migration failed: {}", e)))?;
            }
        }

        Ok(())
    }

    fn table(kind: GridKind) -> &'static str {
        match kind {
            GridKind::Depth => "depth_samples",
            GridKind::Tide => "tide_samples",
        }
    }
}

#[async_trait]
impl GridStore for PgGridStore {
    async fn locate(
        &self,
        region: RegionName,
        kind: GridKind,
        point: GeoPoint,
    ) -> NogoResult<Option<GridIndex>> {
        let sql = format!(
            "SELECT m, n FROM {} \
             WHERE region = $1 \
             AND lat BETWEEN $2 - $4 AND $2 + $4 \
             AND lon BETWEEN $3 - $4 AND $3 + $4 \
             ORDER BY (lat - $2) * (lat - $2) + (lon - $3) * (lon - $3) \
             LIMIT 1",
            Self::table(kind)
        );

        let row = sqlx::query_as::<_, IndexRow>(&sql)
            .bind(region.as_str())
            .bind(point.lat)
            .bind(point.lon)
            .bind(self.search_radius_deg)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| NogoError::DatabaseError(format!("Locate failed: {}", e)))?;

        let index = row.map(|r| GridIndex::new(r.m, r.n));
        debug!(region = %region, kind = %kind, ?point, ?index, "Located grid point");
        Ok(index)
    }

    async fn fetch_depth(
        &self,
        region: RegionName,
        first: GridIndex,
        second: GridIndex,
    ) -> NogoResult<Vec<DepthSample>> {
        let (lo, hi) = GridIndex::span(first, second);

        let rows = sqlx::query_as::<_, DepthRow>(
            "SELECT m, n, lat, lon, depth FROM depth_samples \
             WHERE region = $1 AND m BETWEEN $2 AND $3 AND n BETWEEN $4 AND $5 \
             ORDER BY m, n",
        )
        .bind(region.as_str())
        .bind(lo.m)
        .bind(hi.m)
        .bind(lo.n)
        .bind(hi.n)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| NogoError::DatabaseError(format!("Depth query failed: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn fetch_tide(
        &self,
        region: RegionName,
        first: GridIndex,
        second: GridIndex,
        window: TimeWindow,
    ) -> NogoResult<Option<Vec<TideSample>>> {
        let (lo, hi) = GridIndex::span(first, second);

        let rows = sqlx::query_as::<_, TideRow>(
            "SELECT m, n, depth, time FROM tide_samples \
             WHERE region = $1 AND m BETWEEN $2 AND $3 AND n BETWEEN $4 AND $5 \
             AND time BETWEEN $6 AND $7 \
             ORDER BY m, n, time",
        )
        .bind(region.as_str())
        .bind(lo.m)
        .bind(hi.m)
        .bind(lo.n)
        .bind(hi.n)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| NogoError::DatabaseError(format!("Tide query failed: {}", e)))?;

        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(rows.into_iter().map(|r| r.into()).collect()))
    }

    async fn health_check(&self) -> NogoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| NogoError::DatabaseError(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}

#[derive(FromRow)]
struct IndexRow {
    m: i32,
    n: i32,
}

#[derive(FromRow)]
struct DepthRow {
    m: i32,
    n: i32,
    lat: f64,
    lon: f64,
    depth: Option<f64>,
}

impl From<DepthRow> for DepthSample {
    fn from(row: DepthRow) -> Self {
        DepthSample::new(row.m, row.n, row.lat, row.lon, row.depth)
    }
}

#[derive(FromRow)]
struct TideRow {
    m: i32,
    n: i32,
    depth: Option<f64>,
    time: DateTime<Utc>,
}

impl From<TideRow> for TideSample {
    fn from(row: TideRow) -> Self {
        TideSample::new(row.m, row.n, row.depth, row.time)
    }
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS depth_samples (
    region VARCHAR(32) NOT NULL,
    m INTEGER NOT NULL,
    n INTEGER NOT NULL,
    lat DOUBLE PRECISION NOT NULL,
    lon DOUBLE PRECISION NOT NULL,
    depth DOUBLE PRECISION,
    PRIMARY KEY (region, m, n)
);

CREATE INDEX IF NOT EXISTS idx_depth_samples_position ON depth_samples(region, lat, lon);

CREATE TABLE IF NOT EXISTS tide_samples (
    region VARCHAR(32) NOT NULL,
    m INTEGER NOT NULL,
    n INTEGER NOT NULL,
    lat DOUBLE PRECISION NOT NULL,
    lon DOUBLE PRECISION NOT NULL,
    depth DOUBLE PRECISION,
    time TIMESTAMPTZ NOT NULL,
    PRIMARY KEY (region, m, n, time)
);

CREATE INDEX IF NOT EXISTS idx_tide_samples_position ON tide_samples(region, lat, lon)
"#;
