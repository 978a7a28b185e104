mod helpers;
mod test_bin;
mod test_init;
mod test_list;
mod test_nested;
mod test_release;
mod test_run;
