//! SQLite-backed catalog store.

use async_trait::async_trait;
use sqlx::sqlite::{Sqlite, SqlitePool, SqliteRow};
use sqlx::{FromRow, QueryBuilder, SqliteConnection, Transaction};

use super::{
    still_referenced, CatalogStore, DirectorRepository, GenreRepository, MovieRepository,
    DIRECTOR, GENRE, MOVIE,
};
use crate::config::ReferencePolicy;
use crate::error::StoreError;
use crate::model::{
    DbId, Director, Genre, IdFilter, Movie, MovieFilter, NewDirector, NewGenre, NewMovie,
    UpdateDirector, UpdateGenre, UpdateMovie,
};

/// Column list for `movie` queries.
const MOVIE_COLUMNS: &str =
    "id, title, description, trailer, year, rating, genre_id, director_id";

/// Column list for `director` and `genre` queries.
const NAMED_COLUMNS: &str = "id, name";

/// Names the table and the `movie` column that points at it.
struct NamedTable {
    entity: &'static str,
    table: &'static str,
    movie_fk: &'static str,
}

const DIRECTORS: NamedTable = NamedTable {
    entity: DIRECTOR,
    table: "director",
    movie_fk: "director_id",
};

const GENRES: NamedTable = NamedTable {
    entity: GENRE,
    table: "genre",
    movie_fk: "genre_id",
};

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Read-then-write transaction. Takes the write lock at `BEGIN` so a second
    /// writer waits out the busy timeout instead of failing with SQLITE_BUSY.
    async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>, StoreError> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    async fn list_named<T>(&self, t: &NamedTable) -> Result<Vec<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = format!("SELECT {NAMED_COLUMNS} FROM {} ORDER BY id", t.table);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_named<T>(&self, t: &NamedTable, id: DbId) -> Result<Option<T>, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = format!("SELECT {NAMED_COLUMNS} FROM {} WHERE id = ?", t.table);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert_named(&self, t: &NamedTable, name: Option<&str>) -> Result<DbId, StoreError> {
        let sql = format!("INSERT INTO {} (name) VALUES (?)", t.table);
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql).bind(name).execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    /// Fetch-then-save for a named row. `patch` mutates the loaded name.
    async fn update_named<T, F>(&self, t: &NamedTable, id: DbId, patch: F) -> Result<T, StoreError>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + NamedRow,
        F: FnOnce(&mut T) + Send,
    {
        let mut tx = self.begin_write().await?;
        let select = format!("SELECT {NAMED_COLUMNS} FROM {} WHERE id = ?", t.table);
        let mut row = sqlx::query_as::<_, T>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound { entity: t.entity, id })?;
        patch(&mut row);

        let update = format!("UPDATE {} SET name = ? WHERE id = ?", t.table);
        tracing::debug!(sql = %update, id, "query (tx)");
        let result = sqlx::query(&update)
            .bind(row.name())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        expect_one_row(t.entity, id, result.rows_affected())?;
        tx.commit().await?;
        Ok(row)
    }

    async fn delete_named(
        &self,
        t: &NamedTable,
        id: DbId,
        policy: ReferencePolicy,
    ) -> Result<(), StoreError> {
        let mut tx = self.begin_write().await?;
        let exists_sql = format!("SELECT id FROM {} WHERE id = ?", t.table);
        let exists: Option<DbId> = sqlx::query_scalar(&exists_sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(StoreError::NotFound { entity: t.entity, id });
        }

        apply_reference_policy(&mut tx, t, id, policy).await?;

        let delete_sql = format!("DELETE FROM {} WHERE id = ?", t.table);
        tracing::debug!(sql = %delete_sql, id, ?policy, "query (tx)");
        sqlx::query(&delete_sql).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Access to the single mutable column of `director` / `genre` rows.
trait NamedRow {
    fn name(&self) -> Option<&str>;
}

impl NamedRow for Director {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl NamedRow for Genre {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

fn expect_one_row(entity: &str, id: DbId, affected: u64) -> Result<(), StoreError> {
    if affected == 1 {
        Ok(())
    } else {
        Err(StoreError::Conflict(format!(
            "update of {entity} {id} touched {affected} rows"
        )))
    }
}

async fn apply_reference_policy(
    conn: &mut SqliteConnection,
    t: &NamedTable,
    id: DbId,
    policy: ReferencePolicy,
) -> Result<(), StoreError> {
    match policy {
        ReferencePolicy::Ignore => {}
        ReferencePolicy::Restrict => {
            let sql = format!("SELECT COUNT(*) FROM movie WHERE {} = ?", t.movie_fk);
            let count: i64 = sqlx::query_scalar(&sql).bind(id).fetch_one(&mut *conn).await?;
            if count > 0 {
                return Err(still_referenced(t.entity, count));
            }
        }
        ReferencePolicy::Nullify => {
            let sql = format!("UPDATE movie SET {fk} = NULL WHERE {fk} = ?", fk = t.movie_fk);
            sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        }
        ReferencePolicy::Cascade => {
            let sql = format!("DELETE FROM movie WHERE {} = ?", t.movie_fk);
            let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
            tracing::info!(
                entity = t.entity,
                id,
                movies = result.rows_affected(),
                "cascaded delete"
            );
        }
    }
    Ok(())
}

#[async_trait]
impl MovieRepository for SqliteStore {
    async fn list_movies(&self, filter: &MovieFilter) -> Result<Vec<Movie>, StoreError> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {MOVIE_COLUMNS} FROM movie WHERE 1 = 1"));
        for (column, key) in [("director_id", filter.director_id), ("genre_id", filter.genre_id)] {
            match key {
                None => {}
                Some(IdFilter::Equals(id)) => {
                    qb.push(format!(" AND {column} = ")).push_bind(id);
                }
                Some(IdFilter::Blank) => {
                    qb.push(" AND 1 = 0");
                }
            }
        }
        qb.push(" ORDER BY id");
        tracing::debug!(sql = %qb.sql(), ?filter, "query");
        Ok(qb.build_query_as::<Movie>().fetch_all(&self.pool).await?)
    }

    async fn find_movie(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movie WHERE id = ?");
        Ok(sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_movie(&self, new: NewMovie) -> Result<Movie, StoreError> {
        let result = sqlx::query(
            "INSERT INTO movie (title, description, trailer, year, rating, genre_id, director_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(new.title.as_deref())
        .bind(new.description.as_deref())
        .bind(new.trailer.as_deref())
        .bind(new.year)
        .bind(new.rating)
        .bind(new.genre_id)
        .bind(new.director_id)
        .execute(&self.pool)
        .await?;
        Ok(new.into_movie(result.last_insert_rowid()))
    }

    async fn update_movie(&self, id: DbId, patch: &UpdateMovie) -> Result<Movie, StoreError> {
        let mut tx = self.begin_write().await?;
        let select = format!("SELECT {MOVIE_COLUMNS} FROM movie WHERE id = ?");
        let mut movie = sqlx::query_as::<_, Movie>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::NotFound { entity: MOVIE, id })?;
        patch.apply(&mut movie);

        let result = sqlx::query(
            "UPDATE movie SET title = ?, description = ?, trailer = ?, year = ?, rating = ?, \
             genre_id = ?, director_id = ? WHERE id = ?",
        )
        .bind(movie.title.as_deref())
        .bind(movie.description.as_deref())
        .bind(movie.trailer.as_deref())
        .bind(movie.year)
        .bind(movie.rating)
        .bind(movie.genre_id)
        .bind(movie.director_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        expect_one_row(MOVIE, id, result.rows_affected())?;
        tx.commit().await?;
        Ok(movie)
    }

    async fn delete_movie(&self, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM movie WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: MOVIE, id });
        }
        Ok(())
    }
}

#[async_trait]
impl DirectorRepository for SqliteStore {
    async fn list_directors(&self) -> Result<Vec<Director>, StoreError> {
        self.list_named(&DIRECTORS).await
    }

    async fn find_director(&self, id: DbId) -> Result<Option<Director>, StoreError> {
        self.find_named(&DIRECTORS, id).await
    }

    async fn create_director(&self, new: NewDirector) -> Result<Director, StoreError> {
        let id = self.insert_named(&DIRECTORS, new.name.as_deref()).await?;
        Ok(new.into_director(id))
    }

    async fn update_director(
        &self,
        id: DbId,
        patch: &UpdateDirector,
    ) -> Result<Director, StoreError> {
        self.update_named(&DIRECTORS, id, |row: &mut Director| patch.apply(row))
            .await
    }

    async fn delete_director(&self, id: DbId, policy: ReferencePolicy) -> Result<(), StoreError> {
        self.delete_named(&DIRECTORS, id, policy).await
    }
}

#[async_trait]
impl GenreRepository for SqliteStore {
    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError> {
        self.list_named(&GENRES).await
    }

    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, StoreError> {
        self.find_named(&GENRES, id).await
    }

    async fn create_genre(&self, new: NewGenre) -> Result<Genre, StoreError> {
        let id = self.insert_named(&GENRES, new.name.as_deref()).await?;
        Ok(new.into_genre(id))
    }

    async fn update_genre(&self, id: DbId, patch: &UpdateGenre) -> Result<Genre, StoreError> {
        self.update_named(&GENRES, id, |row: &mut Genre| patch.apply(row))
            .await
    }

    async fn delete_genre(&self, id: DbId, policy: ReferencePolicy) -> Result<(), StoreError> {
        self.delete_named(&GENRES, id, policy).await
    }
}

#[async_trait]
impl CatalogStore for SqliteStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
