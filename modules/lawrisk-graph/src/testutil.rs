//! Test utilities for spinning up a real Neo4j instance via testcontainers.

use testcontainers::{
    core::{ContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

use crate::{query, GraphClient};

/// Spin up a Neo4j container and return the container handle + connected GraphClient.
///
/// The container is dropped (and stopped) when `ContainerAsync` goes out of scope,
/// so callers must hold it alive for the duration of the test.
pub async fn neo4j_container() -> (ContainerAsync<GenericImage>, GraphClient) {
    let image = GenericImage::new("neo4j", "5.25.1-community")
        .with_exposed_port(ContainerPort::Tcp(7687))
        .with_wait_for(WaitFor::message_on_stdout("Started."))
        .with_env_var("NEO4J_AUTH", "neo4j/testpassword");

    let container: ContainerAsync<GenericImage> = image
        .start()
        .await
        .expect("Failed to start Neo4j container");

    let host_port = container
        .get_host_port_ipv4(7687)
        .await
        .expect("Failed to get Neo4j host port");

    let uri = format!("bolt://127.0.0.1:{host_port}");
    let client = GraphClient::connect(&uri, "neo4j", "testpassword")
        .await
        .expect("Failed to connect to Neo4j");

    (container, client)
}

/// Small statute used by the reader tests:
///
/// - 산업안전보건법 (법률) contains 제38조, 제39조, 제40조
/// - 산업안전보건법 시행령 (대통령령) contains 제38조 of the decree
/// - 제38조 -HIERARCHY-> 제39조, -REFERENCE_WEAK-> 제39조, -PENALTY_LINK-> 제168조,
///   -DELEGATION_PATTERN-> decree 제38조
/// - 제40조 has no relations, no risk level and an integer `article_no`
pub async fn seed_statute(client: &GraphClient) {
    let cypher = "
        CREATE (act:DOC {node_id: 'DOC-ACT', law_name: '산업안전보건법', level: '법률'})
        CREATE (decree:DOC {node_id: 'DOC-DECREE', law_name: '산업안전보건법', level: '대통령령'})
        CREATE (a38:ARTICLE {node_id: 'ACT-38', law_name: '산업안전보건법', article_no: '38',
                title: '안전조치', content: '사업주는 위험을 예방하기 위하여 필요한 조치를 하여야 한다.',
                risk_level_final: 'HIGH', risk_evidence: ['조치', '위험'], risk_from_penalties_level: true})
        CREATE (a39:ARTICLE {node_id: 'ACT-39', law_name: '산업안전보건법', article_no: '39',
                title: '보건조치', content: '사업주는 건강장해를 예방하여야 한다.', risk_level_final: 'MEDIUM'})
        CREATE (a40:ARTICLE {node_id: 'ACT-40', law_name: '산업안전보건법', article_no: 40,
                title: '근로자의 준수', content: '근로자는 조치 사항을 지켜야 한다.'})
        CREATE (p168:ARTICLE {node_id: 'ACT-168', law_name: '산업안전보건법', article_no: '168',
                title: '벌칙', content: '5년 이하의 징역에 처한다.'})
        CREATE (d38:ARTICLE {node_id: 'DECREE-38', law_name: '산업안전보건법', article_no: '38',
                title: '안전조치의 세부', content: '세부 기준은 고용노동부령으로 정한다.'})
        CREATE (act)-[:CONTAINS]->(a38), (act)-[:CONTAINS]->(a39), (act)-[:CONTAINS]->(a40),
               (act)-[:CONTAINS]->(p168), (decree)-[:CONTAINS]->(d38)
        CREATE (a38)-[:HIERARCHY]->(a39), (a38)-[:REFERENCE_WEAK]->(a39),
               (a38)-[:PENALTY_LINK]->(p168), (a38)-[:DELEGATION_PATTERN]->(d38)
    ";
    client
        .inner()
        .run(query(cypher))
        .await
        .expect("Failed to seed statute");
}
