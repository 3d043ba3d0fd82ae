mod cube_scenarios;
mod random_contacts;
mod structure_generation;
