mod common;
mod diabetes;
mod routing;
