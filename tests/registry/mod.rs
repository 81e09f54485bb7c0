mod registry_round_trip_test;
