mod helpers;

mod enrollment_test;
mod router_test;
