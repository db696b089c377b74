mod sheets_test;
