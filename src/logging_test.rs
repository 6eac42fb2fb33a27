#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn init_is_noop_but_callable_twice() {
    init();
    init();
}
