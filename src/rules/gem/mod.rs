pub(crate) mod rules;

#[cfg(test)]
mod tests;
