//! In-process catalog store. Used by tests and for running without a database file.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{
    still_referenced, CatalogStore, DirectorRepository, GenreRepository, MovieRepository,
    DIRECTOR, GENRE, MOVIE,
};
use crate::config::ReferencePolicy;
use crate::error::StoreError;
use crate::model::{
    DbId, Director, Genre, Movie, MovieFilter, NewDirector, NewGenre, NewMovie, UpdateDirector,
    UpdateGenre, UpdateMovie,
};

/// One table: rows keyed by id plus the last id handed out. Ids are never reused.
struct Table<T> {
    rows: BTreeMap<DbId, T>,
    last_id: DbId,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Table {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(DbId) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn patch(
        &mut self,
        entity: &'static str,
        id: DbId,
        apply: impl FnOnce(&mut T),
    ) -> Result<T, StoreError> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or(StoreError::NotFound { entity, id })?;
        apply(row);
        Ok(row.clone())
    }
}

#[derive(Default)]
struct Tables {
    movies: Table<Movie>,
    directors: Table<Director>,
    genres: Table<Genre>,
}

impl Tables {
    /// Apply `policy` to movies whose key (picked by `fk`) equals `id`.
    fn release_references(
        &mut self,
        entity: &'static str,
        id: DbId,
        policy: ReferencePolicy,
        fk: fn(&mut Movie) -> &mut Option<DbId>,
    ) -> Result<(), StoreError> {
        let mut referencing = Vec::new();
        for (movie_id, movie) in self.movies.rows.iter_mut() {
            if *fk(movie) == Some(id) {
                referencing.push(*movie_id);
            }
        }
        match policy {
            ReferencePolicy::Ignore => {}
            ReferencePolicy::Restrict => {
                if !referencing.is_empty() {
                    return Err(still_referenced(entity, referencing.len() as i64));
                }
            }
            ReferencePolicy::Nullify => {
                for movie_id in referencing {
                    if let Some(movie) = self.movies.rows.get_mut(&movie_id) {
                        *fk(movie) = None;
                    }
                }
            }
            ReferencePolicy::Cascade => {
                for movie_id in referencing {
                    self.movies.rows.remove(&movie_id);
                }
            }
        }
        Ok(())
    }
}

fn director_key(movie: &mut Movie) -> &mut Option<DbId> {
    &mut movie.director_id
}

fn genre_key(movie: &mut Movie) -> &mut Option<DbId> {
    &mut movie.genre_id
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MovieRepository for MemoryStore {
    async fn list_movies(&self, filter: &MovieFilter) -> Result<Vec<Movie>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .rows
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn find_movie(&self, id: DbId) -> Result<Option<Movie>, StoreError> {
        Ok(self.tables.read().await.movies.rows.get(&id).cloned())
    }

    async fn create_movie(&self, new: NewMovie) -> Result<Movie, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.movies.insert_with(|id| new.into_movie(id)))
    }

    async fn update_movie(&self, id: DbId, patch: &UpdateMovie) -> Result<Movie, StoreError> {
        let mut tables = self.tables.write().await;
        tables.movies.patch(MOVIE, id, |m| patch.apply(m))
    }

    async fn delete_movie(&self, id: DbId) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        tables
            .movies
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { entity: MOVIE, id })
    }
}

#[async_trait]
impl DirectorRepository for MemoryStore {
    async fn list_directors(&self) -> Result<Vec<Director>, StoreError> {
        Ok(self.tables.read().await.directors.rows.values().cloned().collect())
    }

    async fn find_director(&self, id: DbId) -> Result<Option<Director>, StoreError> {
        Ok(self.tables.read().await.directors.rows.get(&id).cloned())
    }

    async fn create_director(&self, new: NewDirector) -> Result<Director, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.directors.insert_with(|id| new.into_director(id)))
    }

    async fn update_director(
        &self,
        id: DbId,
        patch: &UpdateDirector,
    ) -> Result<Director, StoreError> {
        let mut tables = self.tables.write().await;
        tables.directors.patch(DIRECTOR, id, |d| patch.apply(d))
    }

    async fn delete_director(&self, id: DbId, policy: ReferencePolicy) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.directors.rows.contains_key(&id) {
            return Err(StoreError::NotFound { entity: DIRECTOR, id });
        }
        tables.release_references(DIRECTOR, id, policy, director_key)?;
        tables.directors.rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl GenreRepository for MemoryStore {
    async fn list_genres(&self) -> Result<Vec<Genre>, StoreError> {
        Ok(self.tables.read().await.genres.rows.values().cloned().collect())
    }

    async fn find_genre(&self, id: DbId) -> Result<Option<Genre>, StoreError> {
        Ok(self.tables.read().await.genres.rows.get(&id).cloned())
    }

    async fn create_genre(&self, new: NewGenre) -> Result<Genre, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.insert_with(|id| new.into_genre(id)))
    }

    async fn update_genre(&self, id: DbId, patch: &UpdateGenre) -> Result<Genre, StoreError> {
        let mut tables = self.tables.write().await;
        tables.genres.patch(GENRE, id, |g| patch.apply(g))
    }

    async fn delete_genre(&self, id: DbId, policy: ReferencePolicy) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.genres.rows.contains_key(&id) {
            return Err(StoreError::NotFound { entity: GENRE, id });
        }
        tables.release_references(GENRE, id, policy, genre_key)?;
        tables.genres.rows.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ids_increase_monotonically() {
        let store = MemoryStore::new();
        let a = store.create_genre(NewGenre { name: Some("Drama".into()) }).await.unwrap();
        store.delete_genre(a.id, ReferencePolicy::Ignore).await.unwrap();
        let b = store.create_genre(NewGenre { name: Some("War".into()) }).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[tokio::test]
    async fn delete_missing_movie_is_not_found() {
        let store = MemoryStore::new();
        let err = store.delete_movie(9).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Movie", id: 9 }));
    }

    #[tokio::test]
    async fn restrict_keeps_director_and_movie() {
        let store = MemoryStore::new();
        let nolan = store
            .create_director(NewDirector { name: Some("Nolan".into()) })
            .await
            .unwrap();
        store
            .create_movie(NewMovie {
                director_id: Some(nolan.id),
                ..Default::default()
            })
            .await
            .unwrap();

        let err = store
            .delete_director(nolan.id, ReferencePolicy::Restrict)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.list_directors().await.unwrap().len(), 1);
        assert_eq!(store.list_movies(&MovieFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn nullify_and_cascade_on_genre_delete() {
        let store = MemoryStore::new();
        let war = store.create_genre(NewGenre { name: Some("War".into()) }).await.unwrap();
        let drama = store.create_genre(NewGenre { name: Some("Drama".into()) }).await.unwrap();
        let dunkirk = store
            .create_movie(NewMovie {
                genre_id: Some(war.id),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .create_movie(NewMovie {
                genre_id: Some(drama.id),
                ..Default::default()
            })
            .await
            .unwrap();

        store.delete_genre(war.id, ReferencePolicy::Nullify).await.unwrap();
        let saved = store.find_movie(dunkirk.id).await.unwrap().unwrap();
        assert_eq!(saved.genre_id, None);

        store.delete_genre(drama.id, ReferencePolicy::Cascade).await.unwrap();
        let left = store.list_movies(&MovieFilter::default()).await.unwrap();
        assert_eq!(left, vec![saved]);
    }
}
