use wardencore::{
    item::Item,
    params::Params,
};
use super::{
    BoxError,
    Rule,
};

/// Passes iff the parameter under `key` is a string equal to the id of
/// the user being checked, e.g. a user may only update their own
/// profile.  A missing or non-string parameter denies.
#[derive(Clone, Debug)]
pub struct ParamMatchesUser {
    key: String,
}

impl ParamMatchesUser {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Rule for ParamMatchesUser {
    fn evaluate(
        &self,
        user_id: &str,
        _item: &Item,
        params: &Params,
    ) -> Result<bool, BoxError> {
        Ok(params.get_str(&self.key) == Some(user_id))
    }
}

/// Always yields the wrapped value.
#[derive(Clone, Copy, Debug)]
pub struct Constant(pub bool);

impl Rule for Constant {
    fn evaluate(
        &self,
        _user_id: &str,
        _item: &Item,
        _params: &Params,
    ) -> Result<bool, BoxError> {
        Ok(self.0)
    }
}
