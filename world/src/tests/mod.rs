mod pick_tests;
mod shared_tests;
