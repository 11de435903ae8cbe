mod favorite;
mod health;
mod response;
mod search;
