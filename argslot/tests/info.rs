// Copyright (c) 2020 Google LLC All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![cfg(feature = "serde")]

use {
    argslot::{from_arg_value, FixedArity, Flag, Target, Targets},
    serde_json::json,
};

#[derive(Targets)]
#[allow(dead_code)]
struct Serve {
    port: u16,
    bind: Option<Vec<String>>,
}

#[test]
fn target_info_json() {
    let infos: Vec<_> = Serve::targets().iter().map(Target::info).collect();
    let value = serde_json::to_value(&infos).expect("serializable");
    assert_eq!(
        value,
        json!([
            {
                "name": "port",
                "shape": "Scalar",
                "type_name": "u16",
                "element_name": null,
                "nullable": false,
            },
            {
                "name": "bind",
                "shape": "Sequence",
                "type_name": std::any::type_name::<Vec<String>>(),
                "element_name": std::any::type_name::<String>(),
                "nullable": true,
            },
        ])
    );
}

#[test]
fn parser_info_json() {
    let pair = FixedArity::new(from_arg_value::<u16>(), 2).unwrap();
    assert_eq!(
        serde_json::to_value(pair.info()).expect("serializable"),
        json!({ "arity": 2, "value_type": "u16", "repeatable": true })
    );
    assert_eq!(
        serde_json::to_value(Flag.info()).expect("serializable"),
        json!({ "arity": 0, "value_type": "bool", "repeatable": false })
    );
}
