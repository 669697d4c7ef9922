pub(crate) mod helpers;
pub(crate) mod rules;

#[cfg(test)]
mod tests;
