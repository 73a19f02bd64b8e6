pub mod burndown;

#[cfg(test)]
mod burndown_test;
