//! Shared fixtures for integration tests

#![allow(dead_code)]

/// Tidy export with a cyclic pair, a self-flow and a suppressed estimate
pub const TIDY_CSV: &str = "\
period,source_id,source_label,destination_id,destination_label,estimate,moe
2021,CA,California,TX,Texas,12500,500
2021,TX,Texas,CA,California,\"9,800\",+/-410
2021,CA,California,NV,Nevada,7300,300
2021,NY,New York,FL,Florida,21000,900
2021,NY,New York,NY,New York,5000,100
2021,OR,Oregon,WA,Washington,N/A,N/A
";

/// Legacy wide table for three states
pub fn legacy_csv() -> String {
    let lines = [
        "Table 1. State-to-State Migration Flows: 2019",
        "Current residence in,Population 1 year and over,,Same house 1 year ago,,Same state of residence 1 year ago,,Different state of residence 1 year ago,,Idaho,,Montana,,Wyoming,",
        ",Estimate,MOE,Estimate,MOE,Estimate,MOE,Estimate,MOE,Estimate,MOE,Estimate,MOE,Estimate,MOE",
        "Idaho,\"1,770,000\",+/-100,0,0,0,0,0,0,,,\"2,310\",+/-512,880,+/-201",
        "Montana,\"1,050,000\",+/-90,0,0,0,0,0,0,\"1,902\",+/-433,,,\"1,117\",+/-300",
        "Wyoming,\"570,000\",+/-50,0,0,0,0,0,0,415,+/-160,\"2,006\",+/-410,,",
        "United States,\"320,000,000\",+/-1,0,0,0,0,0,0,9,+/-1,9,+/-1,9,+/-1",
    ];
    lines.join("\n")
}

/// Dynamic GEXF with a node that leaves and returns
pub const GEXF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gexf xmlns="http://gexf.net/1.3" version="1.3">
  <graph mode="dynamic" defaultedgetype="directed">
    <attributes class="node">
      <attribute id="region" title="region" type="string"/>
    </attributes>
    <nodes>
      <node id="A" label="Accra">
        <attvalues><attvalue for="region" value="West"/></attvalues>
        <spells><spell start="2018" end="2020"/></spells>
      </node>
      <node id="B" label="Bamako">
        <spells><spell start="2018" end="2018"/><spell start="2020" end="2020"/></spells>
      </node>
      <node id="C" label="Cotonou">
        <spells><spell start="2018" end="2020"/></spells>
      </node>
    </nodes>
    <edges>
      <edge id="0" source="A" target="B" weight="30">
        <spells><spell start="2018" end="2020"/></spells>
      </edge>
      <edge id="1" source="B" target="A" weight="10">
        <spells><spell start="2018" end="2020"/></spells>
      </edge>
      <edge id="2" source="A" target="C" weight="5">
        <spells><spell start="2019" end="2020"/></spells>
      </edge>
    </edges>
  </graph>
</gexf>"#;
