//! Route lookup.
//!
//! # Responsibilities
//! - Hold the full set of gateway routes
//! - Resolve (method, path) to a route entry plus bound path variables
//! - Return an explicit no-match rather than a silent default
//!
//! # Design Decisions
//! - The table is built once at startup and immutable for the process
//!   lifetime; shared via `Arc` without locks
//! - Each route carries its own auth and relay flags, so the dispatcher
//!   stays a single data-driven algorithm
//! - O(n) scan over entries; at ~35 routes a trie is not worth it

use axum::http::Method;

use crate::routing::pattern::PathPattern;

/// The downstream service a route forwards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Artist,
    Song,
    Playlist,
    User,
    Authentication,
}

impl Backend {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Artist => "artist",
            Backend::Song => "song",
            Backend::Playlist => "playlist",
            Backend::User => "user",
            Backend::Authentication => "authentication",
        }
    }
}

/// One rule mapping a method and path shape to a downstream service.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    pub method: Method,
    pub pattern: PathPattern,
    pub backend: Backend,
    /// Whether the session check gates this route.
    pub requires_auth: bool,
    /// Whether the downstream response is passed back to the caller.
    /// Delete-style routes report a bare success instead.
    pub relay_response: bool,
}

/// A successful lookup: the matched entry plus bound path variables.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub entry: &'a RouteEntry,
    /// `(name, value)` pairs in path order.
    pub params: Vec<(&'a str, String)>,
}

impl RouteMatch<'_> {
    /// The path to request on the downstream service, with variables
    /// substituted back in positionally.
    pub fn downstream_path(&self) -> String {
        self.entry.pattern.expand(self.params.iter().map(|(_, v)| v.as_str()))
    }
}

/// The static route table.
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Build the full gateway surface: per-resource CRUD routes, the user
    /// library routes, and the public authentication routes.
    pub fn new() -> Self {
        let mut entries = Vec::new();

        // Resource CRUD. Deletes do not relay the downstream response.
        let resources = [
            ("artists", "artist_id", Backend::Artist),
            ("songs", "song_id", Backend::Song),
            ("playlists", "playlist_id", Backend::Playlist),
            ("users", "user_id", Backend::User),
        ];
        for (name, id, backend) in resources {
            entries.push(protected(Method::GET, &format!("/{name}"), backend));
            entries.push(protected(Method::GET, &format!("/{name}/{{{id}}}"), backend));
            entries.push(protected(Method::POST, &format!("/{name}"), backend));
            entries.push(protected(Method::PUT, &format!("/{name}/{{{id}}}"), backend));
            entries.push(protected(Method::DELETE, &format!("/{name}/{{{id}}}"), backend));
        }

        // User library: playlists, songs and artists attached to a user.
        let library = [("playlists", "playlist_id"), ("songs", "song_id"), ("artists", "artist_id")];
        for (collection, id) in library {
            let base = format!("/users/{{user_id}}/{collection}");
            let item = format!("{base}/{{{id}}}");
            entries.push(protected(Method::GET, &base, Backend::User));
            entries.push(protected(Method::POST, &item, Backend::User));
            entries.push(protected(Method::DELETE, &item, Backend::User));
        }

        // Songs within a user's playlist.
        let playlist_songs = "/users/{user_id}/playlists/{playlist_id}/songs";
        let playlist_song = "/users/{user_id}/playlists/{playlist_id}/songs/{song_id}";
        entries.push(protected(Method::GET, playlist_songs, Backend::User));
        entries.push(protected(Method::POST, playlist_song, Backend::User));
        entries.push(protected(Method::DELETE, playlist_song, Backend::User));

        // Public authentication surface. No session check, ever.
        for path in ["/login", "/register", "/logout"] {
            entries.push(RouteEntry {
                method: Method::POST,
                pattern: PathPattern::parse(path),
                backend: Backend::Authentication,
                requires_auth: false,
                relay_response: true,
            });
        }

        Self { entries }
    }

    /// Look up the route for a request. Returns `None` when nothing matches;
    /// the dispatcher turns that into a 404.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.entries.iter().find_map(|entry| {
            if entry.method != *method {
                return None;
            }
            entry
                .pattern
                .bind(path)
                .map(|params| RouteMatch { entry, params })
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

fn protected(method: Method, pattern: &str, backend: Backend) -> RouteEntry {
    // Deletes mirror the asymmetric response contract: the call is made but
    // the caller only sees a generic success.
    let relay_response = method != Method::DELETE;
    RouteEntry {
        method,
        pattern: PathPattern::parse(pattern),
        backend,
        requires_auth: true,
        relay_response,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_full_surface() {
        let table = RouteTable::new();
        // 20 resource CRUD + 9 user library + 3 playlist songs + 3 public.
        assert_eq!(table.len(), 35);
        assert_eq!(table.entries().iter().filter(|e| !e.requires_auth).count(), 3);
    }

    #[test]
    fn resolves_collection_and_item_routes() {
        let table = RouteTable::new();

        let m = table.resolve(&Method::GET, "/artists").unwrap();
        assert_eq!(m.entry.backend, Backend::Artist);
        assert!(m.entry.requires_auth);
        assert!(m.params.is_empty());

        let m = table.resolve(&Method::PUT, "/songs/15").unwrap();
        assert_eq!(m.entry.backend, Backend::Song);
        assert_eq!(m.params, vec![("song_id", "15".to_string())]);
        assert_eq!(m.downstream_path(), "/songs/15");
    }

    #[test]
    fn resolves_nested_user_routes() {
        let table = RouteTable::new();

        let m = table.resolve(&Method::GET, "/users/42/playlists/7/songs").unwrap();
        assert_eq!(m.entry.backend, Backend::User);
        assert_eq!(m.downstream_path(), "/users/42/playlists/7/songs");

        let m = table.resolve(&Method::POST, "/users/42/artists/3").unwrap();
        assert_eq!(m.entry.backend, Backend::User);
        assert_eq!(
            m.params,
            vec![("user_id", "42".to_string()), ("artist_id", "3".to_string())]
        );
    }

    #[test]
    fn method_must_match() {
        let table = RouteTable::new();
        assert!(table.resolve(&Method::PATCH, "/artists/1").is_none());
        assert!(table.resolve(&Method::GET, "/login").is_none());
    }

    #[test]
    fn unknown_path_does_not_resolve() {
        let table = RouteTable::new();
        assert!(table.resolve(&Method::GET, "/albums").is_none());
        assert!(table.resolve(&Method::GET, "/users/42/albums").is_none());
    }

    #[test]
    fn public_routes_skip_auth_and_relay() {
        let table = RouteTable::new();
        for path in ["/login", "/register", "/logout"] {
            let m = table.resolve(&Method::POST, path).unwrap();
            assert_eq!(m.entry.backend, Backend::Authentication);
            assert!(!m.entry.requires_auth);
            assert!(m.entry.relay_response);
        }
    }

    #[test]
    fn delete_routes_do_not_relay() {
        let table = RouteTable::new();
        for entry in table.entries() {
            if entry.method == Method::DELETE {
                assert!(!entry.relay_response, "{} should not relay", entry.pattern);
            } else {
                assert!(entry.relay_response, "{} should relay", entry.pattern);
            }
        }
    }

    #[test]
    fn at_most_one_entry_matches_any_request() {
        let table = RouteTable::new();
        let entries = table.entries();
        for (i, a) in entries.iter().enumerate() {
            for b in &entries[i + 1..] {
                assert!(
                    !(a.method == b.method && a.pattern.overlaps(&b.pattern)),
                    "ambiguous routes: {} {} vs {} {}",
                    a.method,
                    a.pattern,
                    b.method,
                    b.pattern
                );
            }
        }
    }
}
