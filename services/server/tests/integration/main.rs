mod account_test;
mod password_reset_test;
