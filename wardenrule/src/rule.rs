use wardencore::{
    item::Item,
    params::Params,
};

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A named predicate that gates access to an item at check time.
///
/// Implementations must be pure functions of their arguments; the same
/// rule may be evaluated concurrently by any number of checks.
pub trait Rule: Send + Sync {
    fn evaluate(
        &self,
        user_id: &str,
        item: &Item,
        params: &Params,
    ) -> Result<bool, BoxError>;
}

impl<F> Rule for F
where
    F: Fn(&str, &Item, &Params) -> Result<bool, BoxError> + Send + Sync,
{
    fn evaluate(
        &self,
        user_id: &str,
        item: &Item,
        params: &Params,
    ) -> Result<bool, BoxError> {
        self(user_id, item, params)
    }
}

mod stock;
pub use stock::{
    Constant,
    ParamMatchesUser,
};
