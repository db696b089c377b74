mod auth_flow_test;
