mod range_set_tests;
