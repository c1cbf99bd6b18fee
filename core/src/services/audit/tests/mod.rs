mod sink_tests;
