pub mod control;
pub mod narrator;
