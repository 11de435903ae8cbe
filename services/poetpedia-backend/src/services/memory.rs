use async_trait::async_trait;
use poetpedia_common::PoemId;
use tokio::sync::RwLock;

use crate::domain::ports::secondary::{FavoriteError as Error, FavoriteStorage};
use crate::domain::{FavoriteChange, FavoritePoem, Poem};

/// Favorite store held in memory, shared by every client of the server.
#[derive(Debug, Default)]
pub struct MemoryFavoriteStorage {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    // Insertion order.
    poems: Vec<FavoritePoem>,
    next_id: u64,
}

impl Inner {
    fn allocate_id(&mut self) -> PoemId {
        loop {
            self.next_id += 1;
            let id = PoemId::from(self.next_id);
            if !self.poems.iter().any(|poem| poem.id == id) {
                return id;
            }
        }
    }

    fn position(&self, change: &FavoriteChange) -> Option<usize> {
        self.poems
            .iter()
            .position(|poem| poem.id == change.id)
            .or_else(|| {
                self.poems
                    .iter()
                    .position(|poem| poem.title == change.title && poem.author == change.author)
            })
    }
}

impl MemoryFavoriteStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FavoriteStorage for MemoryFavoriteStorage {
    async fn register(&self, poem: &Poem) -> Result<FavoritePoem, Error> {
        if poem.title.trim().is_empty() {
            return Err(Error::Validation {
                context: "Cannot register a poem without title".to_string(),
            });
        }
        let mut inner = self.inner.write().await;
        if let Some(known) = inner
            .poems
            .iter()
            .find(|known| known.title == poem.title && known.author == poem.author)
        {
            return Ok(known.clone());
        }
        let record = FavoritePoem {
            id: inner.allocate_id(),
            title: poem.title.clone(),
            author: poem.author.clone(),
            lines: poem.text(),
            favorite: false,
        };
        tracing::debug!(id = %record.id, title = %record.title, "registered poem");
        inner.poems.push(record.clone());
        Ok(record)
    }

    async fn toggle(&self, change: &FavoriteChange) -> Result<FavoritePoem, Error> {
        let mut inner = self.inner.write().await;
        let record = match inner.position(change) {
            Some(index) => {
                let poem = &mut inner.poems[index];
                poem.favorite = !poem.favorite;
                poem.clone()
            }
            None => {
                let record = FavoritePoem {
                    id: change.id.clone(),
                    title: change.title.clone(),
                    author: change.author.clone(),
                    lines: change.lines.clone(),
                    favorite: true,
                };
                inner.poems.push(record.clone());
                record
            }
        };
        tracing::info!(id = %record.id, favorite = record.favorite, "toggled favorite");
        Ok(record)
    }

    async fn favorites(&self) -> Result<Vec<FavoritePoem>, Error> {
        let inner = self.inner.read().await;
        Ok(inner
            .poems
            .iter()
            .filter(|poem| poem.favorite)
            .cloned()
            .collect())
    }
}
