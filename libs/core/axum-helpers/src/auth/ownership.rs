//! Load-then-authorize guard for owner-only mutations.
//!
//! ```ignore
//! let product = load_and_authorize(self.repository.find_by_uid(uid), actor, |p| p.user_id)
//!     .await?
//!     .into_result(|| ProductError::NotFound(uid), || ProductError::Forbidden)?;
//! ```

use std::future::Future;

/// Outcome of comparing an entity's owner with the acting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership<T> {
    /// No entity with the requested identifier
    Missing,
    /// Entity exists but belongs to someone else
    Forbidden,
    /// Entity exists and the actor owns it
    Granted(T),
}

impl<T> Ownership<T> {
    /// Compare `owner_of(entity)` with `actor`.
    pub fn check(entity: Option<T>, actor: i64, owner_of: impl Fn(&T) -> i64) -> Self {
        match entity {
            None => Ownership::Missing,
            Some(entity) if owner_of(&entity) == actor => Ownership::Granted(entity),
            Some(_) => Ownership::Forbidden,
        }
    }

    /// Map the two denial outcomes onto caller-specific errors.
    pub fn into_result<E>(
        self,
        missing: impl FnOnce() -> E,
        forbidden: impl FnOnce() -> E,
    ) -> Result<T, E> {
        match self {
            Ownership::Granted(entity) => Ok(entity),
            Ownership::Missing => Err(missing()),
            Ownership::Forbidden => Err(forbidden()),
        }
    }
}

/// Await `load`, then run [`Ownership::check`] on its result.
///
/// Load failures are returned untouched so store errors keep their own
/// classification.
pub async fn load_and_authorize<T, E, Fut>(
    load: Fut,
    actor: i64,
    owner_of: impl Fn(&T) -> i64,
) -> Result<Ownership<T>, E>
where
    Fut: Future<Output = Result<Option<T>, E>>,
{
    let entity = load.await?;
    Ok(Ownership::check(entity, actor, owner_of))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Listing {
        owner: i64,
    }

    #[test]
    fn test_three_outcomes() {
        let owner = |l: &Listing| l.owner;

        assert_eq!(Ownership::<Listing>::check(None, 1, owner), Ownership::Missing);
        assert_eq!(
            Ownership::check(Some(Listing { owner: 2 }), 1, owner),
            Ownership::Forbidden
        );
        assert_eq!(
            Ownership::check(Some(Listing { owner: 1 }), 1, owner),
            Ownership::Granted(Listing { owner: 1 })
        );
    }

    #[test]
    fn test_into_result_maps_each_denial() {
        let missing: Result<Listing, &str> =
            Ownership::Missing.into_result(|| "missing", || "forbidden");
        let forbidden: Result<Listing, &str> =
            Ownership::Forbidden.into_result(|| "missing", || "forbidden");

        assert_eq!(missing.unwrap_err(), "missing");
        assert_eq!(forbidden.unwrap_err(), "forbidden");
    }

    #[tokio::test]
    async fn test_load_and_authorize_propagates_load_error() {
        let result = load_and_authorize(
            async { Err::<Option<Listing>, _>("store down") },
            1,
            |l: &Listing| l.owner,
        )
        .await;
        assert_eq!(result.unwrap_err(), "store down");
    }

    #[tokio::test]
    async fn test_load_and_authorize_grants_owner() {
        let outcome = load_and_authorize(
            async { Ok::<_, String>(Some(Listing { owner: 9 })) },
            9,
            |l: &Listing| l.owner,
        )
        .await
        .unwrap();
        assert!(matches!(outcome, Ownership::Granted(_)));
    }
}
