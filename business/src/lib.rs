pub mod application {
    pub mod extraction {
        pub mod clear_cache;
        pub mod run;
    }
}

pub mod domain {
    pub mod logger;
    pub mod extraction {
        pub mod cache;
        pub mod errors;
        pub mod fingerprint;
        pub mod model;
        pub mod parser;
        pub mod prompt;
        pub mod retry;
        pub mod services;
        pub mod use_cases {
            pub mod clear_cache;
            pub mod run;
        }
    }
}
